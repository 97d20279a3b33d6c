use crate::adapter;
use crate::clock::{Clock, MonotonicClock};
use crate::error::FeedError;
use crate::notifications::NotificationRepository;
use crate::query::parse_feed_query;
use crate::response::FeedResponse;
use crate::store::Store;
use crate::types::{FeedLimits, Notification, QueryParams, SourceEvent};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub correlation_id: Option<String>,
}

impl RequestContext {
    pub fn new(correlation_id: Option<String>) -> Self {
        Self { correlation_id }
    }
}

/// Entry point of the notification feed. Producers record events through
/// [`Feed::notify`]; readers go through [`Feed::get_all`].
pub struct Feed<S: Store> {
    store: S,
    clock: Arc<dyn Clock>,
    limits: FeedLimits,
}

impl<S: Store> Feed<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(MonotonicClock::new()),
            limits: FeedLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: FeedLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> FeedLimits {
        self.limits
    }

    /// Records the notification `recipient` receives for `event`. Recording
    /// the same event for the same recipient again returns the stored record
    /// instead of creating a second one.
    pub fn notify(
        &self,
        ctx: &RequestContext,
        event: &SourceEvent,
        recipient: &str,
    ) -> Result<Notification, FeedError> {
        let mut stored = self.notify_many(ctx, event, std::slice::from_ref(&recipient))?;
        stored
            .pop()
            .ok_or_else(|| FeedError::internal("no notification recorded"))
    }

    /// Records `event` for every recipient in one transaction. Either all
    /// recipients are notified or none are.
    pub fn notify_many<R: AsRef<str>>(
        &self,
        ctx: &RequestContext,
        event: &SourceEvent,
        recipients: &[R],
    ) -> Result<Vec<Notification>, FeedError> {
        let mut drafts = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            let created_at = self.clock.now();
            let draft = adapter::adapt(event, recipient.as_ref(), created_at).map_err(|err| {
                warn!(
                    kind = %event.kind(),
                    source_event_id = event.source_id(),
                    correlation_id = ctx.correlation_id.as_deref(),
                    error = %err,
                    "rejected source event"
                );
                err
            })?;
            drafts.push(draft);
        }

        self.store.with_tx(|store| {
            let repo = store.notifications();
            let mut stored = Vec::with_capacity(drafts.len());
            for draft in drafts {
                if repo.insert(&draft)? {
                    stored.push(draft);
                    continue;
                }
                debug!(
                    kind = %draft.source_event_kind,
                    source_event_id = %draft.source_event_id,
                    recipient = %draft.recipient_id,
                    "duplicate notification suppressed"
                );
                let existing = repo
                    .find_by_source(
                        draft.source_event_kind,
                        &draft.source_event_id,
                        &draft.recipient_id,
                    )?
                    .ok_or_else(|| FeedError::internal("duplicate notification not found"))?;
                stored.push(existing);
            }
            Ok(stored)
        })
    }

    /// Runs a feed query, returning the requested page and the requester's
    /// total unread count.
    pub fn query(
        &self,
        requester: &str,
        params: &QueryParams,
    ) -> Result<(Vec<Notification>, u64), FeedError> {
        let query = parse_feed_query(requester, params, self.limits)?;
        debug!(
            recipient = %query.recipient,
            page = query.page,
            size = query.size,
            unread = ?query.unread,
            kind = ?query.kind,
            "querying feed"
        );
        self.store.with_snapshot(|store| {
            let repo = store.notifications();
            let page = repo.query(&query)?;
            let unread = repo.count_unread(&query.recipient)?;
            Ok((page, unread))
        })
    }

    pub fn get_all(
        &self,
        ctx: &RequestContext,
        requester: &str,
        params: &QueryParams,
    ) -> FeedResponse {
        match self.query(requester, params) {
            Ok((page, unread)) => FeedResponse::ok(page, unread),
            Err(err) => {
                let correlation_id = ctx.correlation_id.as_deref();
                match &err {
                    FeedError::Internal { message } => {
                        error!(correlation_id, error = %message, "feed query failed");
                    }
                    _ => warn!(correlation_id, error = %err, "feed query refused"),
                }
                FeedResponse::from_error(&err)
            }
        }
    }
}
