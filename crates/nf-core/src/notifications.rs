use crate::error::FeedError;
use crate::types::{EventKind, FeedQuery, Notification, NotificationId, RecipientId};

pub trait NotificationRepository {
    /// Stores `notification` unless a record with the same kind, source
    /// event and recipient already exists. Returns whether a row was written.
    fn insert(&self, notification: &Notification) -> Result<bool, FeedError>;
    fn get(&self, id: &NotificationId) -> Result<Option<Notification>, FeedError>;
    fn find_by_source(
        &self,
        kind: EventKind,
        source_event_id: &str,
        recipient: &RecipientId,
    ) -> Result<Option<Notification>, FeedError>;
    /// Page of the recipient's notifications matching `query`, newest first,
    /// ties broken by id ascending.
    fn query(&self, query: &FeedQuery) -> Result<Vec<Notification>, FeedError>;
    fn count_unread(&self, recipient: &RecipientId) -> Result<u64, FeedError>;
}
