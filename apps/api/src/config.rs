use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::render::browser::BrowserMode;

const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin the print-view route is served from.
    pub base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub browser_mode: BrowserMode,
    pub chrome_path: Option<PathBuf>,
    pub render_timeout: Duration,
    pub navigation_timeout: Duration,
    pub network_idle: Duration,
    pub careers_api_url: String,
    pub firestore: Option<FirestoreConfig>,
}

#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = require(&var, "BASE_URL")?
            .trim_end_matches('/')
            .to_string();

        let browser_mode = match non_empty(&var, "BROWSER_MODE") {
            Some(raw) => raw
                .parse::<BrowserMode>()
                .with_context(|| format!("BROWSER_MODE '{raw}' is not 'bundled' or 'system'"))?,
            None => BrowserMode::from_environment(
                non_empty(&var, "APP_ENV")
                    .or_else(|| non_empty(&var, "NODE_ENV"))
                    .as_deref(),
            ),
        };

        let chrome_path = non_empty(&var, "CHROME_PATH").map(PathBuf::from);
        if browser_mode == BrowserMode::Bundled && chrome_path.is_none() {
            bail!("CHROME_PATH must point at the packaged Chromium binary when BROWSER_MODE is 'bundled'");
        }

        let careers_api_url = non_empty(&var, "CAREERS_API_URL")
            .unwrap_or_else(|| format!("{base_url}/api/careers"));

        let firestore = non_empty(&var, "FIRESTORE_PROJECT_ID").map(|project_id| FirestoreConfig {
            base_url: non_empty(&var, "FIRESTORE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string()),
            project_id,
            api_key: non_empty(&var, "FIRESTORE_API_KEY"),
        });

        Ok(Config {
            port: parse_or(&var, "PORT", 8080u16)?,
            rust_log: non_empty(&var, "RUST_LOG").unwrap_or_else(|| "info".to_string()),
            browser_mode,
            chrome_path,
            render_timeout: Duration::from_secs(parse_or(&var, "RENDER_TIMEOUT_SECS", 60u64)?),
            navigation_timeout: Duration::from_secs(parse_or(
                &var,
                "NAVIGATION_TIMEOUT_SECS",
                45u64,
            )?),
            network_idle: Duration::from_millis(parse_or(&var, "NETWORK_IDLE_MS", 500u64)?),
            careers_api_url,
            firestore,
            base_url,
        })
    }
}

fn require<F>(var: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(var, key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn non_empty<F>(var: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(var: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match non_empty(var, key) {
        Some(raw) => raw
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
