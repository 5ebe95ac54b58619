//! HTTP surface
//!
//! Thin axum glue over the planning service and the chatbot.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::chat::ChatBot;
use crate::plan::MentorService;

mod pages;
mod routes;

pub use pages::Pages;
pub use routes::{ChatRequest, ChatResponse, CheckResponse, ProfileForm};

/// Shared, read-only state behind every handler
pub struct AppState {
    pub service: MentorService,
    pub chat: ChatBot,
    pub pages: Pages,
    pub llm_available: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/recommendations", post(routes::recommendations))
        .route("/check-recommendations", post(routes::check_recommendations))
        .route("/chat", post(routes::chat))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("MentorHub listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await.context("Server error")
}
