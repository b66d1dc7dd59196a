use std::path::Path;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use tokio::time::Duration;
use thiserror::Error;
use crate::config::CodeforcesConfig;
use crate::codeforces::profile::{Profile, RawUser};
use crate::codeforces::submission::{into_records, RawSubmission, SubmissionRecord};
use crate::pipelines::perf;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to Codeforces failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Codeforces API returned FAILED: {0}")]
    Api(String),
    #[error("failed to decode Codeforces response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read submissions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("handle '{0}' not found")]
    NotFound(String),
    #[error("Codeforces returned HTTP {0} without an API response")]
    Status(u16),
}

/// `{ "status": "OK" | "FAILED", "comment": ..., "result": ... }`
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    fn into_result(self) -> Result<T, SourceError> {
        if self.status != "OK" {
            return Err(SourceError::Api(
                self.comment.unwrap_or_else(|| format!("status {}", self.status)),
            ));
        }
        self.result
            .ok_or_else(|| SourceError::Api("response has no result field".to_string()))
    }
}

/// Decode a Codeforces API body, surfacing `FAILED` envelopes as errors
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    envelope.into_result()
}

/// Decode a response body, naming the HTTP status when it is not an API envelope.
/// `FAILED` envelopes arrive with 400 and still carry a comment, so the envelope
/// is tried first.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, SourceError> {
    match decode_envelope(body) {
        Err(SourceError::Decode(_)) if !status.is_success() => Err(SourceError::Status(status.as_u16())),
        other => other,
    }
}

/// Query for `user.status`. A `max_submissions` of 0 omits `count`, which
/// returns the full history.
pub fn status_query(handle: &str, max_submissions: u32) -> Vec<(&'static str, String)> {
    let mut query = vec![("handle", handle.to_string()), ("from", "1".to_string())];
    if max_submissions > 0 {
        query.push(("count", max_submissions.to_string()));
    }
    query
}

/// Client for the public Codeforces API
#[derive(Clone)]
pub struct CodeforcesClient {
    http: Client,
    base_url: String,
    max_submissions: u32,
}

impl CodeforcesClient {
    pub fn new(config: &CodeforcesConfig) -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;
        Ok(CodeforcesClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_submissions: config.max_submissions,
        })
    }

    async fn get<T: DeserializeOwned>(&self, method: &str, query: &[(&str, String)]) -> Result<T, SourceError> {
        let _perf = perf::PerfTimer::new("codeforces_request");
        let url = format!("{}/{}", self.base_url, method);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(method = method, status = %status, bytes = body.len(), "Codeforces response");

        decode_response(status, &body)
    }

    /// Fetch the user's submissions (most recent first, as the API returns them)
    pub async fn user_status(&self, handle: &str) -> Result<Vec<SubmissionRecord>, SourceError> {
        let raw: Vec<RawSubmission> = self
            .get("user.status", &status_query(handle, self.max_submissions))
            .await?;
        tracing::info!(handle = handle, submissions = raw.len(), "Fetched submissions");
        if self.max_submissions > 0 && raw.len() >= self.max_submissions as usize {
            tracing::warn!(
                handle = handle,
                max_submissions = self.max_submissions,
                "Submission history truncated; analysis covers only the most recent submissions"
            );
        }
        Ok(into_records(raw))
    }

    /// Fetch rating, rank and organization for a handle
    pub async fn user_info(&self, handle: &str) -> Result<Profile, SourceError> {
        let users: Vec<RawUser> = self
            .get("user.info", &[("handles", handle.to_string())])
            .await?;
        users
            .into_iter()
            .find(|u| u.handle.eq_ignore_ascii_case(handle))
            .map(Profile::from)
            .ok_or_else(|| SourceError::NotFound(handle.to_string()))
    }

    /// Profile and submissions, fetched concurrently
    pub async fn fetch_handle(&self, handle: &str) -> Result<(Profile, Vec<SubmissionRecord>), SourceError> {
        tokio::try_join!(self.user_info(handle), self.user_status(handle))
    }
}

/// Load a saved `user.status` response: either the full API envelope or a bare array
pub async fn load_submissions_file(path: &Path) -> Result<Vec<SubmissionRecord>, SourceError> {
    let body = tokio::fs::read_to_string(path).await?;
    let raw: Vec<RawSubmission> = if body.trim_start().starts_with('[') {
        serde_json::from_str(&body)?
    } else {
        decode_envelope(&body)?
    };
    tracing::info!(path = ?path, submissions = raw.len(), "Loaded submissions from file");
    Ok(into_records(raw))
}
