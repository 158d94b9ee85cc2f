use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/digest", post(handlers::generate_digest))
        .route("/api/analyze", post(handlers::analyze_url))
        .route("/api/history", get(handlers::list_history))
        .route("/api/history/:id", get(handlers::get_history))
        .route("/api/saved", get(handlers::list_saved).post(handlers::toggle_saved))
        .route("/api/ratings", get(handlers::list_ratings).post(handlers::rate_article))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> ddd_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use ddd_core::{Article, Error, Result};
    pub use crate::{create_app, serve, AppState};
}
