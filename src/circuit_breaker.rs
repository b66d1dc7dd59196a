use std::sync::atomic::{AtomicU64, AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use parking_lot::RwLock;
use serde::Serialize;
use crate::config::BackendConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakerState {
    Closed,
    Open,
    /// Cool-down elapsed; the next call is a trial
    HalfOpen,
}

/// Tracks generative backend health so repeated failures skip straight to the
/// template plan instead of waiting on timeouts.
#[derive(Clone)]
pub struct CircuitBreaker {
    failures: Arc<AtomicU64>,
    last_failure: Arc<RwLock<Option<Instant>>>,
    is_open: Arc<AtomicBool>,
    timeout_secs: u64,
    failure_threshold: u64,
}

impl CircuitBreaker {
    /// Create a new circuit breaker
    pub fn new(timeout_secs: u64, failure_threshold: u64) -> Self {
        CircuitBreaker {
            failures: Arc::new(AtomicU64::new(0)),
            last_failure: Arc::new(RwLock::new(None)),
            is_open: Arc::new(AtomicBool::new(false)),
            timeout_secs,
            failure_threshold: failure_threshold.max(1),
        }
    }

    /// Breaker using the backend's threshold and cool-down
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.circuit_timeout_secs, config.failure_threshold)
    }

    /// Current state, accounting for an elapsed cool-down
    pub fn state(&self) -> BreakerState {
        if !self.is_open.load(Ordering::Relaxed) {
            return BreakerState::Closed;
        }
        match *self.last_failure.read() {
            Some(time) if time.elapsed().as_secs() >= self.timeout_secs => BreakerState::HalfOpen,
            _ => BreakerState::Open,
        }
    }

    /// True while calls should be skipped
    pub fn is_open(&self) -> bool {
        self.state() == BreakerState::Open
    }

    /// Record a successful call
    pub fn record_success(&self) {
        self.failures.store(0, Ordering::Relaxed);
        self.is_open.store(false, Ordering::Relaxed);
        *self.last_failure.write() = None;
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_failure.write() = Some(Instant::now());

        if failures >= self.failure_threshold {
            if !self.is_open.swap(true, Ordering::Relaxed) {
                tracing::warn!(failures = failures, "Circuit breaker opened");
            }
        }
    }

    /// Get current failure count
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Exponential backoff calculator
pub struct ExponentialBackoff {
    initial_delay_ms: u64,
    max_delay_ms: u64,
    multiplier: f64,
}

impl ExponentialBackoff {
    pub fn new(initial_delay_ms: u64, max_delay_ms: u64) -> Self {
        ExponentialBackoff {
            initial_delay_ms,
            max_delay_ms,
            multiplier: 2.0,
        }
    }

    /// Delay before retry number `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let delay = (self.initial_delay_ms as f64 * self.multiplier.powi(attempt as i32)) as u64;
        delay.min(self.max_delay_ms)
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(100, 5000)
    }
}
