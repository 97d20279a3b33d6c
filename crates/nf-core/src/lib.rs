pub mod adapter;
pub mod clock;
pub mod error;
pub mod feed;
pub mod notifications;
pub mod query;
pub mod response;
pub mod store;

pub mod types;

pub use crate::error::FeedError;
pub use crate::feed::{Feed, RequestContext};
pub use crate::response::FeedResponse;
pub use crate::store::Store;
