use reqwest::Client;
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};
use crate::pipelines::perf;
use tokio::time::{timeout, Duration};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

/// Concatenate a newline-delimited stream of generate chunks.
/// Lines that are not valid chunks are skipped.
pub fn collect_stream(body: &str) -> String {
    let mut full_response = String::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(chunk) = serde_json::from_str::<GenerateChunk>(line) {
            full_response.push_str(&chunk.response);
            if chunk.done {
                break;
            }
        }
    }
    full_response
}

/// Call `{base_url}/api/generate` and return the full response text
pub async fn call_generate(
    client: &Client,
    base_url: &str,
    model: &str,
    prompt: &str,
    timeout_duration: Duration,
) -> Result<String> {
    let start = std::time::Instant::now();
    let url = format!("{}/api/generate", base_url.trim_end_matches('/'));

    let result = timeout(timeout_duration, async {
        let response = client
            .post(&url)
            .json(&GenerateRequest { model, prompt, stream: true })
            .send()
            .await
            .with_context(|| format!("Failed to connect to generate API for model '{}'", model))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Generate API returned status {} for model '{}'", status, model);
        }

        let body = response.text().await
            .with_context(|| format!("Failed to read response from model '{}'", model))?;

        let full_response = collect_stream(&body);
        if full_response.trim().is_empty() {
            anyhow::bail!("Model '{}' returned empty response", model);
        }
        Ok(full_response)
    }).await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(response)) => {
            perf::log_perf_with_context("generate_call", latency_ms, model);
            tracing::info!(model = model, latency_ms = latency_ms, "Model call succeeded");
            Ok(response)
        }
        Ok(Err(e)) => {
            perf::log_perf_with_context("generate_call_error", latency_ms, model);
            tracing::warn!(model = model, latency_ms = latency_ms, error = %e, "Model call failed");
            Err(e)
        }
        Err(_) => {
            tracing::error!(model = model, duration_secs = timeout_duration.as_secs(), "Timeout exceeded");
            anyhow::bail!("Model '{}' call timed out after {}s", model, timeout_duration.as_secs())
        }
    }
}
