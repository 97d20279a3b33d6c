use crate::error::FeedError;
use crate::types::Notification;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub status: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseError {
    pub code: String,
    pub message: String,
    /// Offending query parameter, for `invalid_query`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// Envelope every feed request is answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub response_meta: ResponseMeta,
    pub data: Option<Vec<Notification>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<u64>,
}

impl FeedResponse {
    pub fn ok(data: Vec<Notification>, unread_count: u64) -> Self {
        Self {
            response_meta: ResponseMeta {
                status: STATUS_OK,
                success: true,
                error: None,
            },
            data: Some(data),
            unread_count: Some(unread_count),
        }
    }

    pub fn failure(status: u16, code: &str, message: impl Into<String>) -> Self {
        Self {
            response_meta: ResponseMeta {
                status,
                success: false,
                error: Some(ResponseError {
                    code: code.to_string(),
                    message: message.into(),
                    parameter: None,
                }),
            },
            data: None,
            unread_count: None,
        }
    }

    /// Maps a domain failure onto the envelope. Internal failures carry a
    /// fixed message; their detail never reaches the caller.
    pub fn from_error(err: &FeedError) -> Self {
        match err {
            FeedError::Query(query) => {
                let mut response =
                    Self::failure(STATUS_BAD_REQUEST, "invalid_query", query.to_string());
                if let Some(error) = response.response_meta.error.as_mut() {
                    error.parameter = Some(query.parameter().to_string());
                }
                response
            }
            FeedError::Scope(scope) => {
                Self::failure(STATUS_FORBIDDEN, "unauthorized_scope", scope.to_string())
            }
            FeedError::Event(event) => {
                Self::failure(STATUS_BAD_REQUEST, "invalid_event", event.to_string())
            }
            FeedError::Internal { .. } => {
                Self::failure(STATUS_INTERNAL_ERROR, "internal_error", INTERNAL_MESSAGE)
            }
        }
    }

    pub fn status(&self) -> u16 {
        self.response_meta.status
    }

    pub fn is_success(&self) -> bool {
        self.response_meta.success
    }

    pub fn error(&self) -> Option<&ResponseError> {
        self.response_meta.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EventError, QueryError, ScopeError};
    use serde_json::json;

    #[test]
    fn success_serializes_to_envelope() {
        let value = serde_json::to_value(FeedResponse::ok(Vec::new(), 3)).unwrap();
        assert_eq!(
            value,
            json!({
                "responseMeta": { "status": 200, "success": true },
                "data": [],
                "unreadCount": 3
            })
        );
    }

    #[test]
    fn query_errors_name_the_parameter() {
        let err = FeedError::from(QueryError::InvalidParameter {
            parameter: "page",
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        });
        let response = FeedResponse::from_error(&err);
        assert_eq!(response.status(), 400);
        assert!(!response.is_success());
        assert!(response.data.is_none());
        let error = response.error().unwrap();
        assert_eq!(error.code, "invalid_query");
        assert_eq!(error.parameter.as_deref(), Some("page"));
    }

    #[test]
    fn scope_and_event_errors_are_client_errors() {
        let scope = FeedResponse::from_error(&FeedError::from(ScopeError::ForeignRecipient {
            requester: "alice".to_string(),
            target: "bob".to_string(),
        }));
        assert_eq!(scope.status(), 403);
        assert_eq!(scope.error().unwrap().code, "unauthorized_scope");

        let event = FeedResponse::from_error(&FeedError::from(EventError::EmptyRecipient));
        assert_eq!(event.status(), 400);
    }

    #[test]
    fn internal_errors_hide_their_detail() {
        let response = FeedResponse::from_error(&FeedError::internal("database is locked"));
        assert_eq!(response.status(), 500);
        let error = response.error().unwrap();
        assert_eq!(error.message, "internal server error");
        assert!(!serde_json::to_string(&response).unwrap().contains("locked"));
    }
}
