use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use ulid::Ulid;

#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

pub const HEADER_NAME: &str = "x-correlation-id";

const MAX_LEN: usize = 128;

/// Caller ids are kept only when short and made of `[A-Za-z0-9._-]`, so they
/// are safe to echo back and to log.
fn resolve(header: Option<&HeaderValue>) -> String {
    header
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| {
            !value.is_empty()
                && value.len() <= MAX_LEN
                && value
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
        })
        .map_or_else(|| format!("corr_{}", Ulid::new()), ToString::to_string)
}

/// Tags the request with a correlation id, runs the handler inside a span
/// carrying it, and echoes it on the response.
pub async fn correlation_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = resolve(request.headers().get(HEADER_NAME));
    let span = tracing::debug_span!("feed_request", correlation_id = %id);

    request.extensions_mut().insert(CorrelationId(id.clone()));
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(HEADER_NAME, value);
    }
    response
}
