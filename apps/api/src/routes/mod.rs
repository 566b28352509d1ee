pub mod health;

use axum::{routing::get, Router};

use crate::careers::handlers::handle_live_jobs;
use crate::landing::handlers::{handle_landing_data, handle_landing_page};
use crate::render::handlers::handle_export_pdf;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handle_landing_page))
        .route("/api/landing", get(handle_landing_data))
        .route("/api/jobs/live", get(handle_live_jobs))
        .route("/api/pdf", get(handle_export_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, FakeCounter, FakeEngine, FakeJobs};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(
            FakeEngine::succeeding(),
            FakeJobs(Ok(vec![])),
            FakeCounter(Ok(0)),
        ));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "jobcv-api");
    }
}
