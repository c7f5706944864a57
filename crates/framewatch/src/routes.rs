use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use framewatch_core::{build_dashboard, DashboardData};

use crate::error::AppError;
use crate::render::render_dashboard;
use crate::state::{AppState, ReloadSummary};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(dashboard_json))
        .route("/reload", post(reload))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn current_dashboard(state: &AppState) -> framewatch_core::Result<DashboardData> {
    let dataset = state.snapshot().await;
    build_dashboard(&dataset.table, &state.config().filter)
}

pub async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let data = current_dashboard(&state).await.map_err(AppError::page)?;
    Ok(Html(render_dashboard(&data)))
}

pub async fn dashboard_json(
    State(state): State<AppState>,
) -> Result<Json<DashboardData>, AppError> {
    current_dashboard(&state)
        .await
        .map(Json)
        .map_err(AppError::api)
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadSummary>, AppError> {
    state.reload().await.map(Json).map_err(AppError::api)
}

async fn healthz() -> &'static str {
    "ok"
}
