//! Network-idle detection for the print view.
//!
//! The browser's own navigation wait returns on "network almost idle" (at most
//! two open connections). Capture needs zero: the page must be fully loaded
//! and must not have fetched anything new for a whole quiescence window.

use std::time::{Duration, Instant};

use serde::Deserialize;

/// Script evaluated in the page to sample its load state.
pub const ACTIVITY_PROBE: &str = "JSON.stringify({\
ready: document.readyState === 'complete', \
resources: performance.getEntriesByType('resource').length})";

/// How often the page is sampled while waiting.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One sample of page load state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageActivity {
    pub ready: bool,
    pub resources: u64,
}

impl PageActivity {
    /// Parses the string returned by [`ACTIVITY_PROBE`].
    pub fn from_probe(value: &serde_json::Value) -> Option<Self> {
        value
            .as_str()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    Busy,
    Idle,
}

/// Tracks how long the resource count has been stable.
#[derive(Debug)]
pub struct NetworkIdle {
    window: Duration,
    stable_since: Option<(u64, Instant)>,
}

impl NetworkIdle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            stable_since: None,
        }
    }

    pub fn observe(&mut self, activity: PageActivity, now: Instant) -> IdleState {
        if !activity.ready {
            self.stable_since = None;
            return IdleState::Busy;
        }

        match self.stable_since {
            Some((count, since)) if count == activity.resources => {
                if now.saturating_duration_since(since) >= self.window {
                    IdleState::Idle
                } else {
                    IdleState::Busy
                }
            }
            _ => {
                self.stable_since = Some((activity.resources, now));
                IdleState::Busy
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    fn ready(resources: u64) -> PageActivity {
        PageActivity {
            ready: true,
            resources,
        }
    }

    #[test]
    fn test_idle_after_full_window_without_new_resources() {
        let start = Instant::now();
        let mut idle = NetworkIdle::new(WINDOW);

        assert_eq!(idle.observe(ready(3), start), IdleState::Busy);
        assert_eq!(
            idle.observe(ready(3), start + Duration::from_millis(300)),
            IdleState::Busy
        );
        assert_eq!(
            idle.observe(ready(3), start + Duration::from_millis(500)),
            IdleState::Idle
        );
    }

    #[test]
    fn test_new_resource_restarts_window() {
        let start = Instant::now();
        let mut idle = NetworkIdle::new(WINDOW);

        idle.observe(ready(3), start);
        assert_eq!(
            idle.observe(ready(4), start + Duration::from_millis(450)),
            IdleState::Busy
        );
        assert_eq!(
            idle.observe(ready(4), start + Duration::from_millis(700)),
            IdleState::Busy
        );
        assert_eq!(
            idle.observe(ready(4), start + Duration::from_millis(950)),
            IdleState::Idle
        );
    }

    #[test]
    fn test_never_idle_before_document_complete() {
        let start = Instant::now();
        let mut idle = NetworkIdle::new(WINDOW);
        let loading = PageActivity {
            ready: false,
            resources: 2,
        };

        idle.observe(loading, start);
        assert_eq!(
            idle.observe(loading, start + Duration::from_secs(5)),
            IdleState::Busy
        );
        // Readiness starts the window; it does not satisfy it.
        assert_eq!(
            idle.observe(ready(2), start + Duration::from_secs(6)),
            IdleState::Busy
        );
    }

    #[test]
    fn test_parse_probe_result() {
        let value = serde_json::json!("{\"ready\":true,\"resources\":7}");
        assert_eq!(PageActivity::from_probe(&value), Some(ready(7)));
        assert_eq!(PageActivity::from_probe(&serde_json::json!(7)), None);
    }
}
