//! Job postings from the careers API, plus the date and favicon helpers used
//! to present them.

pub mod favicon;
pub mod handlers;
pub mod timing;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CareersError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("careers API returned {0}")]
    Status(String),
}

/// A job posting as served by the careers API.
///
/// Only `id` and `lastDate` are required. Display fields that are missing or
/// `null` read as empty strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    /// Application deadline.
    pub last_date: String,
    #[serde(default)]
    pub start_date: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Postings are kept as raw JSON so one unreadable entry does not sink the
/// rest of the list.
#[derive(Debug, Deserialize)]
struct CareersResponse {
    careers: Vec<Value>,
}

/// Decodes each posting on its own, skipping the ones that do not fit `Job`.
fn read_postings(raw: Vec<Value>) -> Vec<Job> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, posting)| match serde_json::from_value::<Job>(posting) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable job posting");
                None
            }
        })
        .collect()
}

/// What a job looks like on a card: display fields plus the derived favicon
/// and time-left badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: String,
    pub company: String,
    pub position_name: String,
    pub description: String,
    pub job_link: String,
    pub location: String,
    pub favicon_url: String,
    pub time_left: String,
}

impl JobCard {
    pub fn from_job(job: Job, now: DateTime<Utc>) -> Self {
        Self {
            favicon_url: favicon::favicon_url(&job.job_link),
            time_left: timing::time_left_label(&job.last_date, now),
            id: job.id,
            company: job.company,
            position_name: job.position_name,
            description: job.description,
            job_link: job.job_link,
            location: job.location,
        }
    }
}

/// Live postings as cards, in source order.
pub fn live_job_cards(jobs: Vec<Job>, now: DateTime<Utc>) -> Vec<JobCard> {
    timing::live_jobs(jobs, now)
        .into_iter()
        .map(|job| JobCard::from_job(job, now))
        .collect()
}

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, CareersError>;
}

/// Reads `{ "careers": [...] }` from the careers API.
#[derive(Clone)]
pub struct CareersClient {
    client: Client,
    url: String,
}

impl CareersClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl JobSource for CareersClient {
    async fn fetch_jobs(&self) -> Result<Vec<Job>, CareersError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CareersError::Status(status.to_string()));
        }

        let body: CareersResponse = response.json().await?;
        let received = body.careers.len();
        let jobs = read_postings(body.careers);
        debug!("fetched {} job postings ({} readable)", received, jobs.len());
        Ok(jobs)
    }
}
