use thiserror::Error;

/// A source event that cannot be turned into a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event is missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("recipient is empty")]
    EmptyRecipient,
}

/// A recognized query parameter carrying a value that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid value {value:?} for parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: String,
    },
}

impl QueryError {
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { parameter, .. } => parameter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("requester identity is empty")]
    EmptyRequester,
    #[error("{requester} may not read notifications of {target}")]
    ForeignRecipient { requester: String, target: String },
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl FeedError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}
