//! Conversion of domain events into notification records.

use crate::error::EventError;
use crate::types::{
    Comment, CommentThread, Notification, NotificationId, NotificationPayload, RecipientId,
    SourceEvent,
};
use chrono::{DateTime, Utc};

pub const EXCERPT_MAX_CHARS: usize = 140;

/// Builds the notification `for_username` receives for `event`.
pub fn adapt(
    event: &SourceEvent,
    for_username: &str,
    created_at: DateTime<Utc>,
) -> Result<Notification, EventError> {
    match event {
        SourceEvent::Comment(comment) => from_comment(comment, for_username, created_at),
        SourceEvent::CommentThread(thread) => {
            from_comment_thread(thread, for_username, created_at)
        }
    }
}

pub fn from_comment(
    comment: &Comment,
    for_username: &str,
    created_at: DateTime<Utc>,
) -> Result<Notification, EventError> {
    let recipient = recipient(for_username)?;
    require("id", &comment.id)?;
    require("threadId", &comment.thread_id)?;
    require("authorUsername", &comment.author_username)?;
    require("body", &comment.body)?;

    let payload = NotificationPayload::CommentAdded {
        comment_id: comment.id.clone(),
        thread_id: comment.thread_id.clone(),
        author_username: comment.author_username.clone(),
        author_name: comment.author_name.clone(),
        excerpt: excerpt(&comment.body),
    };
    Ok(build(recipient, comment.id.clone(), payload, created_at))
}

pub fn from_comment_thread(
    thread: &CommentThread,
    for_username: &str,
    created_at: DateTime<Utc>,
) -> Result<Notification, EventError> {
    let recipient = recipient(for_username)?;
    require("id", &thread.id)?;
    require("applicationId", &thread.application_id)?;
    require("authorUsername", &thread.author_username)?;

    let payload = NotificationPayload::ThreadCreated {
        thread_id: thread.id.clone(),
        application_id: thread.application_id.clone(),
        page_id: thread.page_id.clone(),
        title: thread.title.clone().filter(|title| !title.trim().is_empty()),
        author_username: thread.author_username.clone(),
    };
    Ok(build(recipient, thread.id.clone(), payload, created_at))
}

fn build(
    recipient_id: RecipientId,
    source_event_id: String,
    payload: NotificationPayload,
    created_at: DateTime<Utc>,
) -> Notification {
    Notification {
        id: NotificationId::generate(),
        recipient_id,
        source_event_kind: payload.kind(),
        source_event_id,
        created_at,
        is_read: false,
        payload,
    }
}

fn recipient(for_username: &str) -> Result<RecipientId, EventError> {
    RecipientId::new(for_username).map_err(|_| EventError::EmptyRecipient)
}

fn require(field: &'static str, value: &str) -> Result<(), EventError> {
    if value.trim().is_empty() {
        return Err(EventError::MissingField { field });
    }
    Ok(())
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    let mut chars = body.char_indices();
    match chars.nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}…", body[..cut].trim_end()),
        None => body.to_string(),
    }
}
