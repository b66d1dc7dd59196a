use sha2::{Digest, Sha256};
use serde::{Serialize, Deserialize};
use crate::state::app::AppState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedResponse {
    pub text: String,
    pub timestamp: i64,
}

/// Hex SHA-256 of model name and prompt
pub fn cache_key(model: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model.as_bytes());
    hasher.update([0u8]);
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Look up a generated response for this model and prompt
pub fn get_cached(state: &AppState, model: &str, prompt: &str) -> Option<CachedResponse> {
    let key = cache_key(model, prompt);
    // `get` updates recency, so it needs the write lock
    let hit = state.response_cache.write().get(&key).cloned();

    match hit {
        Some(cached) => {
            tracing::debug!(model = model, key = %&key[..12], "Cache hit");
            state.metrics.record_cache_hit();
            Some(cached)
        }
        None => {
            tracing::debug!(model = model, key = %&key[..12], "Cache miss");
            state.metrics.record_cache_miss();
            None
        }
    }
}

pub fn cache_response(state: &AppState, model: &str, prompt: &str, text: &str) {
    let key = cache_key(model, prompt);
    let cached = CachedResponse {
        text: text.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    };
    state.response_cache.write().put(key, cached);
}
