pub mod enums;
pub mod ids;
pub mod notification;
pub mod query;
pub mod source;

pub use enums::EventKind;
pub use ids::{IdError, NotificationId, RecipientId};
pub use notification::{Notification, NotificationPayload};
pub use query::{FeedLimits, FeedQuery, QueryParams};
pub use source::{Comment, CommentThread, SourceEvent};
