//! Browser acquisition.
//!
//! `BrowserEngine` is the seam between the exporter and a real browser: the
//! Chrome implementation launches a process per session, test doubles count
//! live sessions. A session is released by dropping it.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

use super::idle::{IdleState, NetworkIdle, PageActivity, ACTIVITY_PROBE, POLL_INTERVAL};
use super::{PdfOptions, RenderError};

/// Flags for the minimal serverless Chromium build. Sandboxing is turned off
/// separately through the launch options.
const BUNDLED_ARGS: &[&str] = &[
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--disable-software-rasterizer",
    "--no-zygote",
    "--single-process",
    "--hide-scrollbars",
    "--mute-audio",
    "--font-render-hinting=none",
];

const VIEWPORT: (u32, u32) = (1920, 1080);

/// Where the browser binary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    /// Minimal serverless-packaged Chromium at a fixed path.
    Bundled,
    /// Full local Chrome/Chromium installation.
    System,
}

impl BrowserMode {
    /// Fallback when no mode is configured: production deployments run the
    /// bundled build.
    pub fn from_environment(env: Option<&str>) -> Self {
        match env {
            Some(e) if e.eq_ignore_ascii_case("production") => BrowserMode::Bundled,
            _ => BrowserMode::System,
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown browser mode '{0}'")]
pub struct ParseBrowserModeError(String);

impl FromStr for BrowserMode {
    type Err = ParseBrowserModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bundled" => Ok(BrowserMode::Bundled),
            "system" => Ok(BrowserMode::System),
            _ => Err(ParseBrowserModeError(s.to_string())),
        }
    }
}

pub trait BrowserEngine: Send + Sync {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError>;
}

/// A running browser. Dropping it terminates the process.
pub trait BrowserSession: Send {
    /// Opens `url` in a new tab, waits for network idle and prints it. Every
    /// step is bounded by `deadline`.
    fn capture(
        &mut self,
        url: &str,
        options: &PdfOptions,
        deadline: Instant,
    ) -> Result<Vec<u8>, RenderError>;
}

/// Launches headless Chrome through the DevTools protocol.
#[derive(Debug, Clone)]
pub struct ChromeEngine {
    mode: BrowserMode,
    executable: Option<PathBuf>,
    navigation_timeout: Duration,
    network_idle: Duration,
}

impl ChromeEngine {
    pub fn new(
        mode: BrowserMode,
        executable: Option<PathBuf>,
        navigation_timeout: Duration,
        network_idle: Duration,
    ) -> Self {
        Self {
            mode,
            executable,
            navigation_timeout,
            network_idle,
        }
    }

    fn launch_options<'a>(&self, profile: &TempDir) -> LaunchOptions<'a> {
        let (sandbox, args) = match self.mode {
            BrowserMode::Bundled => (false, BUNDLED_ARGS.iter().map(OsStr::new).collect()),
            BrowserMode::System => (true, Vec::new()),
        };

        LaunchOptions {
            headless: true,
            sandbox,
            window_size: Some(VIEWPORT),
            path: self.executable.clone(),
            user_data_dir: Some(profile.path().to_path_buf()),
            args,
            // Outlive the navigation timeout so a slow page fails on
            // navigation rather than on a dropped connection.
            idle_browser_timeout: self.navigation_timeout + Duration::from_secs(30),
            ..Default::default()
        }
    }
}

impl BrowserEngine for ChromeEngine {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError> {
        let profile = tempfile::Builder::new()
            .prefix("jobcv-chrome-")
            .tempdir()
            .map_err(|e| RenderError::Launch(format!("profile directory: {e}")))?;

        let browser = Browser::new(self.launch_options(&profile))
            .map_err(|e| RenderError::Launch(format!("{e:#}")))?;

        debug!(
            mode = ?self.mode,
            pid = ?browser.get_process_id(),
            "browser launched"
        );

        Ok(Box::new(ChromeSession {
            browser,
            _profile: profile,
            navigation_timeout: self.navigation_timeout,
            network_idle: self.network_idle,
        }))
    }
}

// Field order matters: the browser must exit before its profile directory is
// removed.
struct ChromeSession {
    browser: Browser,
    _profile: TempDir,
    navigation_timeout: Duration,
    network_idle: Duration,
}

impl BrowserSession for ChromeSession {
    fn capture(
        &mut self,
        url: &str,
        options: &PdfOptions,
        deadline: Instant,
    ) -> Result<Vec<u8>, RenderError> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| RenderError::Launch(format!("new tab: {e:#}")))?;
        tab.set_default_timeout(self.navigation_timeout.min(remaining(deadline)?));

        tab.navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| RenderError::Navigation(format!("{e:#}")))?;

        wait_for_network_idle(&tab, self.network_idle, deadline)?;

        tab.set_default_timeout(remaining(deadline)?);
        tab.print_to_pdf(Some(print_options(options)))
            .map_err(|e| RenderError::Capture(format!("{e:#}")))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        debug!(pid = ?self.browser.get_process_id(), "closing browser");
    }
}

/// Time left before `deadline`, or `DeadlineExceeded` once it has passed.
fn remaining(deadline: Instant) -> Result<Duration, RenderError> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(RenderError::DeadlineExceeded);
    }
    Ok(left)
}

fn wait_for_network_idle(tab: &Tab, window: Duration, deadline: Instant) -> Result<(), RenderError> {
    let mut idle = NetworkIdle::new(window);

    loop {
        let probe = tab
            .evaluate(ACTIVITY_PROBE, false)
            .map_err(|e| RenderError::Navigation(format!("activity probe: {e:#}")))?;
        let activity = probe
            .value
            .as_ref()
            .and_then(PageActivity::from_probe)
            .ok_or_else(|| RenderError::Navigation("activity probe returned no data".into()))?;

        let now = Instant::now();
        if idle.observe(activity, now) == IdleState::Idle {
            return Ok(());
        }
        if now >= deadline {
            return Err(RenderError::DeadlineExceeded);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn print_options(options: &PdfOptions) -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(options.print_background),
        paper_width: Some(options.paper_width),
        paper_height: Some(options.paper_height),
        margin_top: Some(options.margin_top),
        margin_right: Some(options.margin_right),
        margin_bottom: Some(options.margin_bottom),
        margin_left: Some(options.margin_left),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: BrowserMode) -> ChromeEngine {
        ChromeEngine::new(
            mode,
            Some(PathBuf::from("/opt/chromium/chromium")),
            Duration::from_secs(45),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_parse_browser_mode() {
        assert_eq!("bundled".parse::<BrowserMode>().unwrap(), BrowserMode::Bundled);
        assert_eq!("System".parse::<BrowserMode>().unwrap(), BrowserMode::System);
        assert!("lambda".parse::<BrowserMode>().is_err());
    }

    #[test]
    fn test_mode_from_environment() {
        assert_eq!(BrowserMode::from_environment(Some("production")), BrowserMode::Bundled);
        assert_eq!(BrowserMode::from_environment(Some("development")), BrowserMode::System);
        assert_eq!(BrowserMode::from_environment(None), BrowserMode::System);
    }

    #[test]
    fn test_bundled_launch_disables_sandbox() {
        let profile = tempfile::tempdir().unwrap();
        let opts = engine(BrowserMode::Bundled).launch_options(&profile);
        assert!(opts.headless);
        assert!(!opts.sandbox);
        assert!(opts.args.contains(&OsStr::new("--single-process")));
        assert_eq!(opts.path, Some(PathBuf::from("/opt/chromium/chromium")));
        assert_eq!(opts.user_data_dir.as_deref(), Some(profile.path()));
    }

    #[test]
    fn test_system_launch_keeps_sandbox() {
        let profile = tempfile::tempdir().unwrap();
        let opts = engine(BrowserMode::System).launch_options(&profile);
        assert!(opts.sandbox);
        assert!(opts.args.is_empty());
        assert_eq!(opts.window_size, Some(VIEWPORT));
    }

    #[test]
    fn test_print_options_carry_page_setup() {
        let pdf = print_options(&PdfOptions::resume());
        assert_eq!(pdf.paper_width, Some(8.27));
        assert_eq!(pdf.paper_height, Some(11.7));
        assert_eq!(pdf.print_background, Some(true));
        assert_eq!(pdf.landscape, None);
    }

    #[test]
    fn test_remaining_counts_down_to_the_deadline() {
        let left = remaining(Instant::now() + Duration::from_secs(5)).unwrap();
        assert!(left > Duration::from_secs(4) && left <= Duration::from_secs(5));
        assert!(matches!(
            remaining(Instant::now()),
            Err(RenderError::DeadlineExceeded)
        ));
    }
}
