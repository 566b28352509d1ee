use axum::{extract::State, Json};
use chrono::Utc;

use crate::careers::{live_job_cards, JobCard};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/jobs/live
///
/// Postings whose application window contains the current time.
pub async fn handle_live_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobCard>>, AppError> {
    let jobs = state.jobs.fetch_jobs().await?;
    Ok(Json(live_job_cards(jobs, Utc::now())))
}
