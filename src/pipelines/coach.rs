use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tokio::time::Instant;
use crate::analysis::{analyze, Analysis};
use crate::cache::{cache_response, get_cached};
use crate::circuit_breaker::ExponentialBackoff;
use crate::codeforces::{Profile, SubmissionRecord};
use crate::error::CoachError;
use crate::pipelines::perf;
use crate::prompts::{synthesize_fallback, synthesize_prompt};
use crate::state::app::AppState;

/// Where a recommendation's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Ai,
    Template,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub handle: String,
    pub mode: GenerationMode,
    pub content: String,
    /// Backend model for AI content
    pub model: Option<String>,
    /// Display only; not part of the recommendation itself
    pub generated_at: DateTime<Utc>,
    pub analysis: Analysis,
}

/// Fetch a handle's profile and submissions, then build a recommendation
pub async fn recommend(state: &AppState, handle: &str) -> Result<Recommendation, CoachError> {
    let _perf = perf::PerfTimer::new("recommend_total");
    let (profile, records) = state.codeforces.fetch_handle(handle).await
        .map_err(|e| CoachError::from(e).with_context(format!("handle: {}", handle)))?;

    Ok(recommend_from_records(state, handle, &profile, &records).await)
}

/// Analyze already-fetched data and produce a recommendation.
///
/// Backend failures never surface as errors: the template plan is returned
/// with `GenerationMode::Template` instead.
pub async fn recommend_from_records(
    state: &AppState,
    handle: &str,
    profile: &Profile,
    records: &[SubmissionRecord],
) -> Recommendation {
    let analysis = analyze(records);
    state.metrics.record_analysis();

    let (mode, content, model) = match generate_ai(state, handle, profile, &analysis).await {
        Ok(text) => (GenerationMode::Ai, text, Some(state.backend.name().to_string())),
        Err(e) => {
            tracing::warn!(handle = handle, error = %e, "Using template recommendation");
            state.metrics.record_fallback();
            (GenerationMode::Template, synthesize_fallback(handle, profile, &analysis), None)
        }
    };

    tracing::info!(handle = handle, mode = ?mode, solved = analysis.total_problems_solved, "Recommendation ready");

    Recommendation {
        handle: handle.to_string(),
        mode,
        content,
        model,
        generated_at: Utc::now(),
        analysis,
    }
}

async fn generate_ai(
    state: &AppState,
    handle: &str,
    profile: &Profile,
    analysis: &Analysis,
) -> Result<String, CoachError> {
    let backend = &state.backend;
    if !backend.is_enabled() {
        return Err(CoachError::new("generative backend is disabled", "routing"));
    }

    let model = backend.name().to_string();
    let prompt = synthesize_prompt(handle, profile, analysis);

    if let Some(cached) = get_cached(state, &model, &prompt) {
        return Ok(cached.text);
    }

    if state.breaker.is_open() {
        return Err(CoachError::new("circuit breaker is open", "routing").with_model(model));
    }

    let text = generate_with_retry(state, &model, &prompt).await?;
    cache_response(state, &model, &prompt, &text);
    Ok(text)
}

/// Call the backend with exponential backoff between attempts
async fn generate_with_retry(state: &AppState, model: &str, prompt: &str) -> Result<String, CoachError> {
    let backoff = ExponentialBackoff::default();
    let max_retries = state.config.backend.max_retries;

    let mut attempt = 0u32;
    loop {
        let attempt_start = Instant::now();
        match state.backend.generate(prompt).await {
            Ok(text) => {
                let latency_ms = attempt_start.elapsed().as_millis() as u64;
                state.breaker.record_success();
                state.metrics.record_backend_success(latency_ms);
                if attempt > 0 {
                    tracing::info!(model = model, attempt = attempt, "Model call succeeded after retry");
                }
                return Ok(text);
            }
            Err(e) => {
                state.breaker.record_failure();
                state.metrics.record_backend_failure();

                if attempt >= max_retries || state.breaker.is_open() {
                    tracing::error!(model = model, error = %e, attempts = attempt + 1, "Model call failed after all retries");
                    return Err(CoachError::new(
                        format!("Model '{}' failed after {} attempts: {:#}", model, attempt + 1, e),
                        "model_call",
                    )
                    .with_model(model)
                    .with_retry(false));
                }

                let delay_ms = backoff.delay_for_attempt(attempt);
                tracing::warn!(
                    model = model,
                    error = %e,
                    attempt = attempt + 1,
                    max_retries = max_retries,
                    delay_ms = delay_ms,
                    "Model call failed, retrying with backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
