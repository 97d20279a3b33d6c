use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nf_core::{FeedError, FeedResponse};

/// Sends the envelope with the HTTP status it carries.
pub fn respond(response: FeedResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response)).into_response()
}

pub fn map_error(err: &FeedError) -> Response {
    respond(FeedResponse::from_error(err))
}
