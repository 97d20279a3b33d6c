use nf_core::error::FeedError;
use nf_core::store::Store;
use rusqlite::Connection;

use crate::notification_repo::NotificationRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for DbStore {
    type Notifications<'a>
        = NotificationRepo<'a>
    where
        Self: 'a;

    fn notifications(&self) -> Self::Notifications<'_> {
        NotificationRepo::new(&self.conn)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, FeedError>
    where
        F: FnOnce(&Self) -> Result<T, FeedError>,
    {
        self.transaction("BEGIN IMMEDIATE", f)
    }

    fn with_snapshot<F, T>(&self, f: F) -> Result<T, FeedError>
    where
        F: FnOnce(&Self) -> Result<T, FeedError>,
    {
        self.transaction("BEGIN DEFERRED", f)
    }
}

impl DbStore {
    fn transaction<F, T>(&self, begin: &str, f: F) -> Result<T, FeedError>
    where
        F: FnOnce(&Self) -> Result<T, FeedError>,
    {
        self.conn.execute_batch(begin).map_err(FeedError::internal)?;
        match f(self) {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT")
                    .map_err(FeedError::internal)?;
                Ok(value)
            }
            Err(err) => {
                self.conn
                    .execute_batch("ROLLBACK")
                    .map_err(FeedError::internal)?;
                Err(err)
            }
        }
    }
}
