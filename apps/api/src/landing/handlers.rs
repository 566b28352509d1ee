use axum::{extract::State, Json};
use chrono::Utc;
use maud::Markup;

use crate::landing::{compose_landing, view::render_landing, LandingPage};
use crate::state::AppState;

/// GET /
pub async fn handle_landing_page(State(state): State<AppState>) -> Markup {
    let page = compose_landing(state.counter.as_ref(), state.jobs.as_ref(), Utc::now()).await;
    render_landing(&page)
}

/// GET /api/landing
///
/// The same view model the HTML page is rendered from.
pub async fn handle_landing_data(State(state): State<AppState>) -> Json<LandingPage> {
    Json(compose_landing(state.counter.as_ref(), state.jobs.as_ref(), Utc::now()).await)
}
