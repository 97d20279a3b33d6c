use crate::routes::error::respond;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use nf_core::response::{FeedResponse, STATUS_UNAUTHORIZED};

/// Identity resolved by the upstream authentication proxy.
#[derive(Clone, Debug)]
pub struct Requester(pub String);

pub const HEADER_NAME: &str = "x-requester-id";

/// Rejects requests that arrive without a resolved requester identity.
pub async fn requester_middleware(mut request: Request<Body>, next: Next) -> Response {
    let requester = request
        .headers()
        .get(HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    let Some(requester) = requester else {
        return respond(FeedResponse::failure(
            STATUS_UNAUTHORIZED,
            "unauthenticated",
            "missing requester identity",
        ));
    };
    request.extensions_mut().insert(Requester(requester));
    next.run(request).await
}
