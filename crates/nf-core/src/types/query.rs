use crate::types::enums::EventKind;
use crate::types::ids::RecipientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::IntoParams;

/// Raw query-string parameters: each key maps to every value it was given,
/// in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value supplied for `key`; later repeats are ignored.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Page-size bounds applied to every feed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Strongly typed form of a feed request, always scoped to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub recipient: RecipientId,
    pub unread: Option<bool>,
    pub kind: Option<EventKind>,
    pub since: Option<DateTime<Utc>>,
    pub page: u32,
    pub size: u32,
}

impl FeedQuery {
    pub fn new(recipient: RecipientId, limits: FeedLimits) -> Self {
        Self {
            recipient,
            unread: None,
            kind: None,
            since: None,
            page: 0,
            size: limits.default_page_size,
        }
    }

    /// Row offset of the requested page, or `None` when it cannot be
    /// represented by the store.
    pub fn offset(&self) -> Option<i64> {
        i64::from(self.page).checked_mul(i64::from(self.size))
    }
}

/// Documented shape of the feed query string.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct FeedQueryDoc {
    /// `true` for unread only, `false` for read only.
    pub unread: Option<bool>,
    pub source_event_kind: Option<EventKind>,
    /// RFC 3339 lower bound on `createdAt`, inclusive.
    pub since: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Must equal the requester when present.
    pub recipient_id: Option<String>,
}
