use std::sync::Arc;
use std::num::NonZeroUsize;
use parking_lot::RwLock;
use lru::LruCache;
use crate::cache::CachedResponse;
use crate::circuit_breaker::CircuitBreaker;
use crate::codeforces::CodeforcesClient;
use crate::config::{get_coach_config, CoachConfig};
use crate::error::CoachError;
use crate::metrics::Metrics;
use crate::models::GenerativeBackend;

const MIN_CACHE_CAPACITY: usize = 1;

/// Application-wide state container, passed explicitly to the pipeline.
/// Cloning is cheap; clones share the cache, metrics and breaker.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CoachConfig>,
    pub backend: GenerativeBackend,
    pub codeforces: CodeforcesClient,
    /// Generated responses keyed by sha256(model, prompt)
    pub response_cache: Arc<RwLock<LruCache<String, CachedResponse>>>,
    pub breaker: CircuitBreaker,
    pub metrics: Metrics,
}

impl AppState {
    /// State built from the process-wide configuration
    pub fn new() -> Result<Self, CoachError> {
        Self::with_config(get_coach_config().clone())
    }

    pub fn with_config(config: CoachConfig) -> Result<Self, CoachError> {
        let backend = GenerativeBackend::from_config(&config.backend)
            .map_err(|e| CoachError::from(e).with_context("building generative backend"))?;
        let codeforces = CodeforcesClient::new(&config.codeforces)?;
        let capacity = NonZeroUsize::new(config.cache_capacity.max(MIN_CACHE_CAPACITY))
            .ok_or_else(|| CoachError::new("cache capacity must be positive", "config"))?;

        Ok(AppState {
            breaker: CircuitBreaker::from_config(&config.backend),
            backend,
            codeforces,
            response_cache: Arc::new(RwLock::new(LruCache::new(capacity))),
            metrics: Metrics::new(),
            config: Arc::new(config),
        })
    }

    /// Override the backend, e.g. to force template mode
    pub fn with_backend(mut self, backend: GenerativeBackend) -> Self {
        self.backend = backend;
        self
    }
}
