use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use serde::Serialize;

/// Atomic counters for the recommendation pipeline
#[derive(Clone, Default)]
pub struct Metrics {
    /// Sum of successful backend call latencies in milliseconds
    pub backend_latency_ms: Arc<AtomicU64>,
    pub backend_success_count: Arc<AtomicU64>,
    pub backend_failure_count: Arc<AtomicU64>,
    pub cache_hit_count: Arc<AtomicU64>,
    pub cache_miss_count: Arc<AtomicU64>,
    /// Recommendations served from the template plan
    pub fallback_count: Arc<AtomicU64>,
    pub analyses_total: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub backend_latency_ms: u64,
    pub backend_success_count: u64,
    pub backend_failure_count: u64,
    pub cache_hit_count: u64,
    pub cache_miss_count: u64,
    pub fallback_count: u64,
    pub analyses_total: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful backend call and its latency
    pub fn record_backend_success(&self, latency_ms: u64) {
        self.backend_success_count.fetch_add(1, Ordering::Relaxed);
        self.backend_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
    }

    /// Record a failed backend call
    pub fn record_backend_failure(&self) {
        self.backend_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record cache hit
    pub fn record_cache_hit(&self) {
        self.cache_hit_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record cache miss
    pub fn record_cache_miss(&self) {
        self.cache_miss_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record fallback to the template plan
    pub fn record_fallback(&self) {
        self.fallback_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed analysis
    pub fn record_analysis(&self) {
        self.analyses_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters at once
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            backend_latency_ms: self.backend_latency_ms.load(Ordering::Relaxed),
            backend_success_count: self.backend_success_count.load(Ordering::Relaxed),
            backend_failure_count: self.backend_failure_count.load(Ordering::Relaxed),
            cache_hit_count: self.cache_hit_count.load(Ordering::Relaxed),
            cache_miss_count: self.cache_miss_count.load(Ordering::Relaxed),
            fallback_count: self.fallback_count.load(Ordering::Relaxed),
            analyses_total: self.analyses_total.load(Ordering::Relaxed),
        }
    }
}
