//! Parsing of loosely typed feed parameters into a [`FeedQuery`].
//!
//! Unknown keys are ignored. Recognized keys with a value that does not
//! parse are rejected with a [`QueryError`] naming the key.

use crate::error::{FeedError, QueryError, ScopeError};
use crate::types::{EventKind, FeedLimits, FeedQuery, QueryParams, RecipientId};
use chrono::{DateTime, Duration, Utc};

pub const PARAM_UNREAD: &str = "unread";
pub const PARAM_KIND: &str = "sourceEventKind";
pub const PARAM_SINCE: &str = "since";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_SIZE: &str = "size";
pub const PARAM_RECIPIENT: &str = "recipientId";

pub fn parse_feed_query(
    requester: &str,
    params: &QueryParams,
    limits: FeedLimits,
) -> Result<FeedQuery, FeedError> {
    let recipient = RecipientId::new(requester).map_err(|_| ScopeError::EmptyRequester)?;
    if let Some(target) = params.first(PARAM_RECIPIENT)
        && target != recipient.as_str()
    {
        return Err(ScopeError::ForeignRecipient {
            requester: recipient.to_string(),
            target: target.to_string(),
        }
        .into());
    }

    let mut query = FeedQuery::new(recipient, limits);
    if let Some(value) = params.first(PARAM_UNREAD) {
        query.unread = Some(parse_bool(PARAM_UNREAD, value)?);
    }
    if let Some(value) = params.first(PARAM_KIND) {
        query.kind = Some(value.trim().parse::<EventKind>().map_err(|err| {
            invalid(PARAM_KIND, value, err.to_string())
        })?);
    }
    if let Some(value) = params.first(PARAM_SINCE) {
        query.since = Some(parse_timestamp(PARAM_SINCE, value)?);
    }
    if let Some(value) = params.first(PARAM_PAGE) {
        query.page = parse_u32(PARAM_PAGE, value)?;
    }
    if let Some(value) = params.first(PARAM_SIZE) {
        query.size = parse_u32(PARAM_SIZE, value)?;
    }
    query.size = query.size.clamp(1, limits.max_page_size.max(1));
    Ok(query)
}

fn invalid(parameter: &'static str, value: &str, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_bool(parameter: &'static str, value: &str) -> Result<bool, QueryError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(parameter, value, "expected true or false")),
    }
}

fn parse_u32(parameter: &'static str, value: &str) -> Result<u32, QueryError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|err| invalid(parameter, value, err.to_string()))
}

/// Stored times have microsecond precision, so a bound between two
/// microseconds is raised to the next one to stay inclusive.
fn parse_timestamp(parameter: &'static str, value: &str) -> Result<DateTime<Utc>, QueryError> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| invalid(parameter, value, err.to_string()))?;
    let sub_micro = parsed.timestamp_subsec_nanos() % 1_000;
    if sub_micro == 0 {
        return Ok(parsed);
    }
    Ok(parsed + Duration::nanoseconds(i64::from(1_000 - sub_micro)))
}
