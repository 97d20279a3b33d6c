use crate::util::{DbError, decode_json, encode_json, from_rfc3339, to_rfc3339};
use nf_core::error::FeedError;
use nf_core::notifications::NotificationRepository;
use nf_core::types::{
    EventKind, FeedQuery, Notification, NotificationId, NotificationPayload, RecipientId,
};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

const COLUMNS: &str =
    "id, recipient_id, source_event_kind, source_event_id, created_at, is_read, payload";

pub struct NotificationRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> NotificationRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn select(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Notification>, FeedError> {
        let mut stmt = self.conn.prepare(sql).map_err(FeedError::internal)?;
        let mut rows = stmt
            .query(params_from_iter(params))
            .map_err(FeedError::internal)?;
        let mut notifications = Vec::new();
        while let Some(row) = rows.next().map_err(FeedError::internal)? {
            notifications.push(map_notification_row(row)?);
        }
        Ok(notifications)
    }
}

impl<'a> NotificationRepository for NotificationRepo<'a> {
    fn insert(&self, notification: &Notification) -> Result<bool, FeedError> {
        let payload = encode_json(&notification.payload).map_err(FeedError::internal)?;
        let sql = "INSERT INTO notifications (id, recipient_id, source_event_kind, source_event_id, created_at, is_read, payload) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) ON CONFLICT (source_event_kind, source_event_id, recipient_id) DO NOTHING";
        let params = (
            notification.id.as_str(),
            notification.recipient_id.as_str(),
            notification.source_event_kind.as_str(),
            notification.source_event_id.as_str(),
            to_rfc3339(&notification.created_at),
            notification.is_read,
            payload,
        );
        let written = self
            .conn
            .execute(sql, params)
            .map_err(FeedError::internal)?;
        Ok(written == 1)
    }

    fn get(&self, id: &NotificationId) -> Result<Option<Notification>, FeedError> {
        let sql = format!("SELECT {COLUMNS} FROM notifications WHERE id = ?1");
        let mut found = self.select(&sql, vec![Value::Text(id.to_string())])?;
        Ok(found.pop())
    }

    fn find_by_source(
        &self,
        kind: EventKind,
        source_event_id: &str,
        recipient: &RecipientId,
    ) -> Result<Option<Notification>, FeedError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM notifications WHERE source_event_kind = ?1 AND source_event_id = ?2 AND recipient_id = ?3"
        );
        let params = vec![
            Value::Text(kind.as_str().to_string()),
            Value::Text(source_event_id.to_string()),
            Value::Text(recipient.to_string()),
        ];
        let mut found = self.select(&sql, params)?;
        Ok(found.pop())
    }

    fn query(&self, query: &FeedQuery) -> Result<Vec<Notification>, FeedError> {
        let Some(offset) = query.offset() else {
            return Ok(Vec::new());
        };

        let mut sql = format!("SELECT {COLUMNS} FROM notifications WHERE recipient_id = ?");
        let mut params = vec![Value::Text(query.recipient.to_string())];
        if let Some(unread) = query.unread {
            sql.push_str(" AND is_read = ?");
            params.push(Value::Integer(i64::from(!unread)));
        }
        if let Some(kind) = query.kind {
            sql.push_str(" AND source_event_kind = ?");
            params.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(since) = &query.since {
            sql.push_str(" AND created_at >= ?");
            params.push(Value::Text(to_rfc3339(since)));
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC LIMIT ? OFFSET ?");
        params.push(Value::Integer(i64::from(query.size)));
        params.push(Value::Integer(offset));

        self.select(&sql, params)
    }

    fn count_unread(&self, recipient: &RecipientId) -> Result<u64, FeedError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM notifications WHERE recipient_id = ?1 AND is_read = 0",
                [recipient.as_str()],
                |row| row.get(0),
            )
            .map_err(FeedError::internal)?;
        u64::try_from(count).map_err(FeedError::internal)
    }
}

fn map_notification_row(row: &rusqlite::Row<'_>) -> Result<Notification, FeedError> {
    let id: String = row.get(0).map_err(FeedError::internal)?;
    let recipient_id: String = row.get(1).map_err(FeedError::internal)?;
    let kind: String = row.get(2).map_err(FeedError::internal)?;
    let source_event_id: String = row.get(3).map_err(FeedError::internal)?;
    let created_at: String = row.get(4).map_err(FeedError::internal)?;
    let is_read: bool = row.get(5).map_err(FeedError::internal)?;
    let payload: String = row.get(6).map_err(FeedError::internal)?;

    let source_event_kind = kind
        .parse::<EventKind>()
        .map_err(|_| FeedError::internal(DbError::InvalidEnum { value: kind }))?;
    let payload: NotificationPayload = decode_json(&payload).map_err(FeedError::internal)?;
    if payload.kind() != source_event_kind {
        return Err(FeedError::internal(format!(
            "payload of {id} does not match kind {source_event_kind}"
        )));
    }

    Ok(Notification {
        id: NotificationId::new(id).map_err(FeedError::internal)?,
        recipient_id: RecipientId::new(recipient_id).map_err(FeedError::internal)?,
        source_event_kind,
        source_event_id,
        created_at: from_rfc3339(&created_at).map_err(FeedError::internal)?,
        is_read,
        payload,
    })
}
