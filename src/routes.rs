//! Entry points used by the command line front end.

use std::path::Path;
use crate::analysis::{analyze, Analysis};
use crate::codeforces::client::load_submissions_file;
use crate::codeforces::{Profile, SubmissionRecord};
use crate::error::CoachError;
use crate::pipelines::coach::{recommend, recommend_from_records, Recommendation};
use crate::prompts::synthesize_prompt;
use crate::state::app::AppState;

/// Profile and submissions from a saved file (empty profile) or the live API
pub async fn load_inputs(
    state: &AppState,
    handle: &str,
    input: Option<&Path>,
) -> Result<(Profile, Vec<SubmissionRecord>), CoachError> {
    match input {
        Some(path) => {
            let records = load_submissions_file(path).await
                .map_err(|e| CoachError::from(e).with_context(format!("path: {:?}", path)))?;
            Ok((Profile::default(), records))
        }
        None => {
            state.codeforces.fetch_handle(handle).await
                .map_err(|e| CoachError::from(e).with_context(format!("handle: {}", handle)))
        }
    }
}

pub async fn analyze_handle(
    state: &AppState,
    handle: &str,
    input: Option<&Path>,
) -> Result<(Profile, Analysis), CoachError> {
    let (profile, records) = load_inputs(state, handle, input).await?;
    state.metrics.record_analysis();
    Ok((profile, analyze(&records)))
}

pub async fn prompt_for_handle(
    state: &AppState,
    handle: &str,
    input: Option<&Path>,
) -> Result<String, CoachError> {
    let (profile, analysis) = analyze_handle(state, handle, input).await?;
    Ok(synthesize_prompt(handle, &profile, &analysis))
}

pub async fn recommend_for_handle(
    state: &AppState,
    handle: &str,
    input: Option<&Path>,
) -> Result<Recommendation, CoachError> {
    match input {
        Some(_) => {
            let (profile, records) = load_inputs(state, handle, input).await?;
            Ok(recommend_from_records(state, handle, &profile, &records).await)
        }
        None => recommend(state, handle).await,
    }
}
