use crate::types::enums::EventKind;
use crate::types::ids::{NotificationId, RecipientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: RecipientId,
    pub source_event_kind: EventKind,
    pub source_event_id: String,
    pub created_at: DateTime<Utc>,
    /// Owned by the read-state service; the feed stores and filters on it
    /// but never flips it.
    pub is_read: bool,
    pub payload: NotificationPayload,
}

/// Kind-specific summary carried by a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationPayload {
    #[serde(rename_all = "camelCase")]
    CommentAdded {
        comment_id: String,
        thread_id: String,
        author_username: String,
        author_name: Option<String>,
        excerpt: String,
    },
    #[serde(rename_all = "camelCase")]
    ThreadCreated {
        thread_id: String,
        application_id: String,
        page_id: Option<String>,
        title: Option<String>,
        author_username: String,
    },
}

impl NotificationPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::CommentAdded { .. } => EventKind::CommentAdded,
            Self::ThreadCreated { .. } => EventKind::ThreadCreated,
        }
    }
}
