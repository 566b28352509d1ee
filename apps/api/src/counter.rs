//! Read-only access to the "resumes created" counter.
//!
//! The counter lives in the document store at `info/resumesCreated`, field
//! `count`. This service never writes it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::FirestoreConfig;

const COUNTER_DOCUMENT: &str = "info/resumesCreated";
const COUNTER_FIELD: &str = "count";

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document store returned {0}")]
    Status(StatusCode),

    #[error("malformed counter document: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn resumes_created(&self) -> Result<u64, CounterError>;
}

/// Used when no document store is configured.
pub struct DisabledCounter;

#[async_trait]
impl CounterSource for DisabledCounter {
    async fn resumes_created(&self) -> Result<u64, CounterError> {
        Ok(0)
    }
}

/// Reads the counter document through the Firestore REST API.
#[derive(Clone)]
pub struct FirestoreCounter {
    client: Client,
    document_url: String,
    api_key: Option<String>,
}

impl FirestoreCounter {
    pub fn new(client: Client, config: &FirestoreConfig) -> Self {
        Self {
            client,
            document_url: format!(
                "{}/projects/{}/databases/(default)/documents/{}",
                config.base_url.trim_end_matches('/'),
                config.project_id,
                COUNTER_DOCUMENT
            ),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl CounterSource for FirestoreCounter {
    async fn resumes_created(&self) -> Result<u64, CounterError> {
        let mut request = self.client.get(&self.document_url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("counter document does not exist yet");
                Ok(0)
            }
            status if status.is_success() => {
                let document: Document = response.json().await?;
                document.count()
            }
            status => Err(CounterError::Status(status)),
        }
    }
}

/// A Firestore document: `{"fields": {"count": {"integerValue": "42"}}}`.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: serde_json::Map<String, Value>,
}

impl Document {
    fn count(&self) -> Result<u64, CounterError> {
        let Some(field) = self.fields.get(COUNTER_FIELD) else {
            return Ok(0);
        };

        // 64-bit integers are transmitted as strings.
        if let Some(raw) = field.get("integerValue") {
            return match raw {
                Value::String(s) => s
                    .parse::<i64>()
                    .map(|n| n.max(0) as u64)
                    .map_err(|_| CounterError::Malformed(format!("integerValue '{s}'"))),
                Value::Number(n) => n
                    .as_i64()
                    .map(|n| n.max(0) as u64)
                    .ok_or_else(|| CounterError::Malformed(format!("integerValue {n}"))),
                other => Err(CounterError::Malformed(format!("integerValue {other}"))),
            };
        }
        if let Some(raw) = field.get("doubleValue").and_then(Value::as_f64) {
            return Ok(raw.max(0.0) as u64);
        }
        Err(CounterError::Malformed(format!("field '{COUNTER_FIELD}' is {field}")))
    }
}
