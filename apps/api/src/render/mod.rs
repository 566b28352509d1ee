//! PDF export: drives a headless browser against the print-view route and
//! captures the result as a paginated PDF.
//!
//! One browser process per export. `PdfExporter` owns no browser: every call
//! launches a fresh `BrowserSession` through the configured `BrowserEngine`
//! and drops it before returning, so nothing outlives the request.
//!
//! Each export gets a single deadline, `render_timeout` from the start of the
//! call. Navigation, the network-idle wait and the print all draw on it, and
//! a capture that finishes late is discarded as `DeadlineExceeded`.

pub mod browser;
pub mod handlers;
pub mod idle;

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Internal route that lays out a resume from `data` and `template`.
pub const PRINT_VIEW_PATH: &str = "/resume/download";

/// Leading bytes of every well-formed PDF document.
const PDF_MAGIC: &[u8] = b"%PDF-";

const CSS_PX_PER_INCH: f64 = 96.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("render did not finish before the deadline")]
    DeadlineExceeded,

    #[error("PDF capture failed: {0}")]
    Capture(String),

    #[error("captured document is not a PDF ({0} bytes)")]
    InvalidDocument(usize),

    #[error("render task aborted: {0}")]
    Task(String),
}

/// Paper size, margins and background flag passed to the browser's print
/// command. Lengths are in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    pub paper_width: f64,
    pub paper_height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub print_background: bool,
}

impl PdfOptions {
    /// A4 with 20px vertical and 10px horizontal margins, backgrounds on.
    pub fn resume() -> Self {
        Self {
            paper_width: 8.27,
            paper_height: 11.7,
            margin_top: px_to_inches(20.0),
            margin_right: px_to_inches(10.0),
            margin_bottom: px_to_inches(20.0),
            margin_left: px_to_inches(10.0),
            print_background: true,
        }
    }
}

fn px_to_inches(px: f64) -> f64 {
    px / CSS_PX_PER_INCH
}

/// Builds the same-origin print-view URL. `data` is percent-encoded again
/// after query decoding; `template` is forwarded as received.
pub fn print_view_url(base_url: &str, data: &str, template: &str) -> String {
    format!(
        "{}{}?data={}&template={}",
        base_url.trim_end_matches('/'),
        PRINT_VIEW_PATH,
        urlencoding::encode(data),
        template
    )
}

/// A resume export after parameter validation.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub data: String,
    pub template: String,
}

/// Launches a browser per export and captures the print view.
pub struct PdfExporter {
    engine: Arc<dyn browser::BrowserEngine>,
    base_url: String,
    options: PdfOptions,
    render_timeout: Duration,
}

impl PdfExporter {
    pub fn new(
        engine: Arc<dyn browser::BrowserEngine>,
        base_url: impl Into<String>,
        render_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            base_url: base_url.into(),
            options: PdfOptions::resume(),
            render_timeout,
        }
    }

    /// Renders the resume to PDF bytes. Browser work is blocking and runs on
    /// the blocking pool. The blocking task is always awaited to completion,
    /// so the session has been dropped on every path before this returns.
    pub async fn export(&self, request: ExportRequest) -> Result<Bytes, RenderError> {
        let render_id = Uuid::new_v4();
        let url = print_view_url(&self.base_url, &request.data, &request.template);
        let engine = Arc::clone(&self.engine);
        let options = self.options;
        let deadline = Instant::now() + self.render_timeout;

        debug!(%render_id, template = %request.template, "starting PDF export");

        let pdf = tokio::task::spawn_blocking(move || {
            capture_once(engine.as_ref(), &url, &options, deadline)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

        info!(%render_id, "Generated PDF size: {} bytes", pdf.len());
        Ok(Bytes::from(pdf))
    }
}

fn capture_once(
    engine: &dyn browser::BrowserEngine,
    url: &str,
    options: &PdfOptions,
    deadline: Instant,
) -> Result<Vec<u8>, RenderError> {
    let mut session = engine.launch()?;
    let result = session.capture(url, options, deadline);
    drop(session);

    let pdf = result?;
    if Instant::now() > deadline {
        return Err(RenderError::DeadlineExceeded);
    }
    if !pdf.starts_with(PDF_MAGIC) {
        return Err(RenderError::InvalidDocument(pdf.len()));
    }
    Ok(pdf)
}
