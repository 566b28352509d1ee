//! Axum route handler for the PDF export.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::render::ExportRequest;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct ExportQuery {
    pub data: Option<String>,
    pub template: Option<String>,
}

impl ExportQuery {
    /// Keeps the first value of each parameter when one is repeated.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "data" => &mut query.data,
                "template" => &mut query.template,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// Both parameters must be present and non-empty; their content is not
    /// inspected.
    fn into_request(self) -> Result<ExportRequest, AppError> {
        match (self.data, self.template) {
            (Some(data), Some(template)) if !data.is_empty() && !template.is_empty() => {
                Ok(ExportRequest { data, template })
            }
            _ => Err(AppError::MissingExportParams),
        }
    }
}

/// GET /api/pdf?data=&template=
///
/// Renders the print view in a fresh headless browser and returns it as a
/// downloadable PDF.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let request = ExportQuery::from_pairs(pairs).into_request()?;
    let pdf = state.exporter.export(request).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=resume.pdf"),
        ],
        pdf,
    )
        .into_response())
}
