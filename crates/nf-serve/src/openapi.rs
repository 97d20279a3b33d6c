use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use nf_core::response::{FeedResponse, ResponseError, ResponseMeta};
use nf_core::types::{EventKind, Notification, NotificationId, NotificationPayload, RecipientId};
use utoipa::OpenApi;

use crate::routes::health::Health;

#[derive(OpenApi)]
#[openapi(
    info(title = "Notification feed API"),
    paths(
        crate::routes::notifications::list_notifications,
        crate::routes::health::health
    ),
    components(schemas(
        FeedResponse,
        ResponseMeta,
        ResponseError,
        Notification,
        NotificationId,
        RecipientId,
        NotificationPayload,
        EventKind,
        Health
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
