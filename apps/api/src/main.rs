mod careers;
mod config;
mod counter;
mod errors;
mod landing;
mod render;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::careers::{CareersClient, JobSource};
use crate::config::Config;
use crate::counter::{CounterSource, DisabledCounter, FirestoreCounter};
use crate::render::browser::ChromeEngine;
use crate::render::PdfExporter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; startup fails on missing required env vars
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job-CV-Manager API v{}", env!("CARGO_PKG_VERSION"));

    // Browser launches happen per export; nothing is started here
    let engine = ChromeEngine::new(
        config.browser_mode,
        config.chrome_path.clone(),
        config.navigation_timeout,
        config.network_idle,
    );
    info!(
        "PDF export: {:?} browser, print view at {}{}",
        config.browser_mode,
        config.base_url,
        render::PRINT_VIEW_PATH
    );

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let jobs: Arc<dyn JobSource> = Arc::new(CareersClient::new(
        http.clone(),
        config.careers_api_url.clone(),
    ));
    info!("Careers API: {}", config.careers_api_url);

    let counter: Arc<dyn CounterSource> = match &config.firestore {
        Some(firestore) => {
            info!("Resume counter: Firestore project {}", firestore.project_id);
            Arc::new(FirestoreCounter::new(http, firestore))
        }
        None => {
            info!("Resume counter disabled (FIRESTORE_PROJECT_ID not set)");
            Arc::new(DisabledCounter)
        }
    };

    // Build app state
    let state = AppState {
        exporter: Arc::new(PdfExporter::new(
            Arc::new(engine),
            config.base_url.clone(),
            config.render_timeout,
        )),
        jobs,
        counter,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
