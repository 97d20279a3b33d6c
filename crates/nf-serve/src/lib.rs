pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use nf_core::types::FeedLimits;
use nf_core::{Feed, FeedError};
use nf_db::schema;
use nf_db::store::DbStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
    pub limits: FeedLimits,
}

pub fn build_feed(state: &AppState) -> Result<Feed<DbStore>, FeedError> {
    let conn = schema::open_and_migrate(&state.db_path).map_err(FeedError::internal)?;
    Ok(Feed::new(DbStore::new(conn)).with_limits(state.limits))
}

pub fn app(state: AppState) -> Router {
    routes::router(state).layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, db_path = %state.db_path, "notification feed listening");
    axum::serve(listener, app(state)).await
}
