use crate::error::FeedError;
use crate::notifications::NotificationRepository;

pub trait Store {
    type Notifications<'a>: NotificationRepository
    where
        Self: 'a;

    fn notifications(&self) -> Self::Notifications<'_>;

    fn with_tx<F, T>(&self, f: F) -> Result<T, FeedError>
    where
        F: FnOnce(&Self) -> Result<T, FeedError>;

    /// Runs read-only work against a single consistent snapshot.
    fn with_snapshot<F, T>(&self, f: F) -> Result<T, FeedError>
    where
        F: FnOnce(&Self) -> Result<T, FeedError>;
}
