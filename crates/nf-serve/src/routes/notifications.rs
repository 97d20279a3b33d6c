use crate::middleware::correlation::CorrelationId;
use crate::middleware::requester::{Requester, requester_middleware};
use crate::routes::error::{map_error, respond};
use crate::{AppState, build_feed};
use axum::extract::{Query, State};
use axum::middleware;
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use nf_core::RequestContext;
use nf_core::response::FeedResponse;
use nf_core::types::QueryParams;
use nf_core::types::query::FeedQueryDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route_layer(middleware::from_fn(requester_middleware))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(
        FeedQueryDoc,
        ("x-requester-id" = String, Header, description = "Resolved requester identity")
    ),
    responses(
        (status = 200, body = FeedResponse),
        (status = 400, body = FeedResponse, description = "Malformed query parameter"),
        (status = 401, body = FeedResponse, description = "No requester identity"),
        (status = 403, body = FeedResponse, description = "Foreign recipient requested"),
        (status = 500, body = FeedResponse)
    )
)]
pub(crate) async fn list_notifications(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Extension(requester): Extension<Requester>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let feed = match build_feed(&state) {
        Ok(feed) => feed,
        Err(err) => {
            tracing::error!(correlation_id = %correlation.0, error = %err, "feed unavailable");
            return map_error(&err);
        }
    };
    let params: QueryParams = pairs.into_iter().collect();
    let ctx = RequestContext::new(Some(correlation.0));
    respond(feed.get_all(&ctx, &requester.0, &params))
}

#[cfg(test)]
mod tests {
    use crate::{AppState, app, build_feed};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use nf_core::RequestContext;
    use nf_core::types::{Comment, FeedLimits, SourceEvent};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn state(dir: &TempDir) -> AppState {
        AppState {
            db_path: dir
                .path()
                .join("notifications.db")
                .to_string_lossy()
                .into_owned(),
            limits: FeedLimits {
                default_page_size: 2,
                max_page_size: 5,
            },
        }
    }

    fn seed(state: &AppState, recipient: &str, count: usize) {
        let feed = build_feed(state).unwrap();
        for i in 0..count {
            let event = SourceEvent::Comment(Comment {
                id: format!("{recipient}-c-{i}"),
                thread_id: "t-1".to_string(),
                author_username: "bob".to_string(),
                author_name: None,
                body: format!("note {i}"),
            });
            feed.notify(&RequestContext::default(), &event, recipient)
                .unwrap();
        }
    }

    async fn get(state: AppState, uri: &str, requester: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(requester) = requester {
            builder = builder.header("x-requester-id", requester);
        }
        let response = app(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        assert!(response.headers().contains_key("x-correlation-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_the_requesters_first_page() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        seed(&state, "alice", 3);
        seed(&state, "bob", 1);

        let (status, body) = get(state, "/api/notifications", Some("alice")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["responseMeta"]["status"], 200);
        assert_eq!(body["responseMeta"]["success"], true);
        assert_eq!(body["unreadCount"], 3);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.iter().all(|n| n["recipientId"] == "alice"));
        assert_eq!(data[0]["sourceEventKind"], "comment-added");
        assert_eq!(data[0]["payload"]["type"], "commentAdded");
    }

    #[tokio::test]
    async fn malformed_parameter_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        seed(&state, "alice", 1);

        let (status, body) =
            get(state, "/api/notifications?page=abc&page=1", Some("alice")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["responseMeta"]["success"], false);
        assert_eq!(body["responseMeta"]["error"]["code"], "invalid_query");
        assert_eq!(body["responseMeta"]["error"]["parameter"], "page");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        seed(&state, "alice", 1);

        let (status, body) = get(
            state,
            "/api/notifications?page=9999&size=50&unknown=1",
            Some("alice"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn foreign_recipient_is_forbidden() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let (status, body) =
            get(state, "/api/notifications?recipientId=bob", Some("alice")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["responseMeta"]["error"]["code"], "unauthorized_scope");
    }

    #[tokio::test]
    async fn missing_requester_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let (status, body) = get(state(&dir), "/api/notifications", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["responseMeta"]["error"]["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn unusable_database_is_a_server_error() {
        let dir = TempDir::new().unwrap();
        let state = AppState {
            db_path: dir.path().to_string_lossy().into_owned(),
            limits: FeedLimits::default(),
        };
        let (status, body) = get(state, "/api/notifications", Some("alice")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["responseMeta"]["error"]["message"], "internal server error");
    }

    #[tokio::test]
    async fn caller_correlation_id_is_echoed() {
        let dir = TempDir::new().unwrap();
        let request = Request::builder()
            .uri("/api/notifications")
            .header("x-requester-id", "alice")
            .header("x-correlation-id", "backfill-7")
            .body(Body::empty())
            .unwrap();
        let response = app(state(&dir)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-correlation-id"], "backfill-7");
    }
}
