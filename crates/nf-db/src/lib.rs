pub mod notification_repo;
pub mod schema;
pub mod store;
pub mod util;

pub use notification_repo::NotificationRepo;
pub use store::DbStore;
