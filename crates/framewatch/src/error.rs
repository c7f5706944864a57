use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use framewatch_core::DashboardError;
use serde_json::json;

use crate::render::render_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorFormat {
    Html,
    Json,
}

/// A failed request, rendered as an error page or a JSON body depending on the route.
#[derive(Debug)]
pub struct AppError {
    error: DashboardError,
    format: ErrorFormat,
}

impl AppError {
    pub fn page(error: DashboardError) -> Self {
        Self {
            error,
            format: ErrorFormat::Html,
        }
    }

    pub fn api(error: DashboardError) -> Self {
        Self {
            error,
            format: ErrorFormat::Json,
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(&self.error)
    }
}

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::SourceUnavailable { .. } => StatusCode::BAD_GATEWAY,
        DashboardError::Schema(_) | DashboardError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DashboardError::Polars(_) | DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.error.to_string();
        tracing::error!(status = status.as_u16(), "request failed: {message}");

        match self.format {
            ErrorFormat::Html => (status, Html(render_error(status, &message))).into_response(),
            ErrorFormat::Json => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}
