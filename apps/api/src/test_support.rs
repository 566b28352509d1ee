//! Test doubles for the browser, the careers API and the counter store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::careers::{CareersError, Job, JobSource};
use crate::config::Config;
use crate::counter::{CounterError, CounterSource};
use crate::render::browser::{BrowserEngine, BrowserMode, BrowserSession};
use crate::render::{PdfExporter, PdfOptions, RenderError};
use crate::state::AppState;

pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake resume\n%%EOF";

#[derive(Clone)]
enum Behavior {
    Return(Vec<u8>),
    /// Ignores the deadline and sleeps before returning a PDF.
    Stall(Duration),
    FailLaunch,
    FailCapture,
}

/// Browser engine that tracks how many sessions are alive.
pub struct FakeEngine {
    behavior: Behavior,
    pub launched: Arc<AtomicUsize>,
    pub alive: Arc<AtomicUsize>,
    pub visited: Arc<Mutex<Vec<String>>>,
    pub deadlines: Arc<Mutex<Vec<Instant>>>,
}

impl FakeEngine {
    fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            launched: Arc::new(AtomicUsize::new(0)),
            alive: Arc::new(AtomicUsize::new(0)),
            visited: Arc::new(Mutex::new(Vec::new())),
            deadlines: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub fn succeeding() -> Arc<Self> {
        Self::with(Behavior::Return(FAKE_PDF.to_vec()))
    }

    pub fn returning(bytes: Vec<u8>) -> Arc<Self> {
        Self::with(Behavior::Return(bytes))
    }

    pub fn stalling(delay: Duration) -> Arc<Self> {
        Self::with(Behavior::Stall(delay))
    }

    pub fn failing_launch() -> Arc<Self> {
        Self::with(Behavior::FailLaunch)
    }

    pub fn failing_capture() -> Arc<Self> {
        Self::with(Behavior::FailCapture)
    }
}

impl BrowserEngine for FakeEngine {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError> {
        if let Behavior::FailLaunch = self.behavior {
            return Err(RenderError::Launch("no chrome executable found".into()));
        }
        self.launched.fetch_add(1, Ordering::SeqCst);
        self.alive.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            behavior: self.behavior.clone(),
            alive: Arc::clone(&self.alive),
            visited: Arc::clone(&self.visited),
            deadlines: Arc::clone(&self.deadlines),
        }))
    }
}

struct FakeSession {
    behavior: Behavior,
    alive: Arc<AtomicUsize>,
    visited: Arc<Mutex<Vec<String>>>,
    deadlines: Arc<Mutex<Vec<Instant>>>,
}

impl BrowserSession for FakeSession {
    fn capture(
        &mut self,
        url: &str,
        _options: &PdfOptions,
        deadline: Instant,
    ) -> Result<Vec<u8>, RenderError> {
        self.visited.lock().unwrap().push(url.to_string());
        self.deadlines.lock().unwrap().push(deadline);
        match &self.behavior {
            Behavior::Return(bytes) => Ok(bytes.clone()),
            Behavior::Stall(delay) => {
                std::thread::sleep(*delay);
                Ok(FAKE_PDF.to_vec())
            }
            _ => Err(RenderError::Navigation("net::ERR_CONNECTION_REFUSED".into())),
        }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.alive.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct FakeJobs(pub Result<Vec<Job>, String>);

#[async_trait]
impl JobSource for FakeJobs {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, CareersError> {
        self.0.clone().map_err(CareersError::Status)
    }
}

pub struct FakeCounter(pub Result<u64, String>);

#[async_trait]
impl CounterSource for FakeCounter {
    async fn resumes_created(&self) -> Result<u64, CounterError> {
        self.0.clone().map_err(CounterError::Malformed)
    }
}

pub fn job(id: &str, start: Option<&str>, last: &str) -> Job {
    Job {
        id: id.to_string(),
        company: "Acme".to_string(),
        position_name: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        job_link: "https://careers.acme.io/jobs/42".to_string(),
        location: "Remote".to_string(),
        last_date: last.to_string(),
        start_date: start.map(str::to_string),
    }
}

pub fn test_config() -> Config {
    Config {
        base_url: "https://cv.example.com".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        browser_mode: BrowserMode::System,
        chrome_path: None,
        render_timeout: Duration::from_secs(60),
        navigation_timeout: Duration::from_secs(45),
        network_idle: Duration::from_millis(500),
        careers_api_url: "https://cv.example.com/api/careers".to_string(),
        firestore: None,
    }
}

pub fn test_state(engine: Arc<FakeEngine>, jobs: FakeJobs, counter: FakeCounter) -> AppState {
    test_state_with(test_config(), engine, jobs, counter)
}

pub fn test_state_with(
    config: Config,
    engine: Arc<FakeEngine>,
    jobs: FakeJobs,
    counter: FakeCounter,
) -> AppState {
    AppState {
        exporter: Arc::new(PdfExporter::new(
            engine,
            config.base_url.clone(),
            config.render_timeout,
        )),
        jobs: Arc::new(jobs),
        counter: Arc::new(counter),
        config,
    }
}
