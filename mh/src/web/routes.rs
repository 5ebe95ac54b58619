//! Route handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::AppState;
use crate::plan::Profile;

/// Fields posted by the profile form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: String,
    pub background: String,
    pub goal: String,
    pub regenerate: String,
}

impl ProfileForm {
    fn profile(&self) -> Profile {
        Profile::new(&self.name, &self.background, &self.goal)
    }

    fn regenerate(&self) -> bool {
        self.regenerate.trim().eq_ignore_ascii_case("true")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub has_recommendations: bool,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// A page that failed to render
pub struct PageError(eyre::Report);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(error = ?self.0, "Page rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl From<eyre::Report> for PageError {
    fn from(e: eyre::Report) -> Self {
        Self(e)
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    debug!("index: called");
    Ok(Html(state.pages.index(state.llm_available)?))
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProfileForm>,
) -> Result<Html<String>, PageError> {
    let profile = form.profile();
    debug!(name = %profile.name, regenerate = form.regenerate(), "recommendations: called");

    let plan = state.service.plan(&profile, form.regenerate()).await;
    Ok(Html(state.pages.recommendations(&profile, &plan)?))
}

pub async fn check_recommendations(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProfileForm>,
) -> Json<CheckResponse> {
    let has_recommendations = state.service.has_cached(&form.profile()).await;
    debug!(%has_recommendations, "check_recommendations: called");

    let message = if has_recommendations {
        "You have existing recommendations. Click 'Generate Recommendations' to view them, \
         or 'Regenerate' to create new ones."
    } else {
        "No existing recommendations found. Click 'Generate Recommendations' to create your \
         personalized learning path."
    };

    Json(CheckResponse {
        has_recommendations,
        message: message.to_string(),
    })
}

pub async fn chat(State(state): State<Arc<AppState>>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    debug!(message_len = request.message.len(), "chat: called");
    Json(ChatResponse {
        response: state.chat.reply(&request.message).await,
    })
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
