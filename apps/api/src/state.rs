use std::sync::Arc;

use crate::careers::JobSource;
use crate::config::Config;
use crate::counter::CounterSource;
use crate::render::PdfExporter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Launches one browser per export; holds no browser between requests.
    pub exporter: Arc<PdfExporter>,
    pub jobs: Arc<dyn JobSource>,
    pub counter: Arc<dyn CounterSource>,
}
