use crate::types::enums::EventKind;
use serde::{Deserialize, Serialize};

/// A comment posted on a thread, as delivered by the commenting service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub thread_id: String,
    pub author_username: String,
    #[serde(default)]
    pub author_name: Option<String>,
    pub body: String,
}

/// A newly opened comment thread.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub application_id: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub author_username: String,
}

/// Every domain event the feed knows how to turn into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SourceEvent {
    Comment(Comment),
    CommentThread(CommentThread),
}

impl SourceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Comment(_) => EventKind::CommentAdded,
            Self::CommentThread(_) => EventKind::ThreadCreated,
        }
    }

    pub fn source_id(&self) -> &str {
        match self {
            Self::Comment(comment) => &comment.id,
            Self::CommentThread(thread) => &thread.id,
        }
    }
}

impl From<Comment> for SourceEvent {
    fn from(value: Comment) -> Self {
        Self::Comment(value)
    }
}

impl From<CommentThread> for SourceEvent {
    fn from(value: CommentThread) -> Self {
        Self::CommentThread(value)
    }
}
