use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::careers::CareersError;
use crate::render::RenderError;

pub const MISSING_EXPORT_PARAMS: &str = "Missing data or template";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing data or template")]
    MissingExportParams,

    #[error("PDF render error: {0}")]
    Render(#[from] RenderError),

    #[error("Careers API error: {0}")]
    Upstream(#[from] CareersError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingExportParams => (
                StatusCode::BAD_REQUEST,
                json!({ "message": MISSING_EXPORT_PARAMS }),
            ),
            AppError::Render(e) => {
                tracing::error!("PDF generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Error generating PDF", "error": e.to_string() }),
                )
            }
            AppError::Upstream(e) => {
                tracing::error!("Careers API error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "message": "Error fetching jobs" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
