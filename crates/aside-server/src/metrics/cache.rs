//! Cache metrics recording.

use async_trait::async_trait;
use aside_core::{CacheError, CacheKey, User, UserCache};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Registra las metricas de cache.
/// Llamar una vez al inicio para registrar las metricas.
pub fn register_cache_metrics() {
    metrics::describe_counter!("aside_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("aside_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "aside_cache_errors_total",
        "Total number of failed cache operations"
    );
    metrics::describe_histogram!(
        "aside_cache_operation_seconds",
        metrics::Unit::Seconds,
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
/// Usa atomic counters internos para maximo rendimiento.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    errors: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("aside_cache_hits_total").increment(1);
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("aside_cache_misses_total").increment(1);
    }

    /// Registra un error de la operacion dada
    pub fn record_error(&self, operation: &'static str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!("aside_cache_errors_total", "operation" => operation).increment(1);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("aside_cache_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let misses = self.misses() as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}

/// [`UserCache`] decorator that records hits, misses, errors and latency of
/// the wrapped cache.
pub struct MeteredCache<C> {
    inner: C,
    metrics: CacheMetrics,
}

impl<C: UserCache> MeteredCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            metrics: CacheMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn finish<T>(
        &self,
        operation: &'static str,
        start: Instant,
        result: &Result<T, CacheError>,
    ) {
        self.metrics
            .record_operation_duration(operation, start.elapsed());
        if result.is_err() {
            self.metrics.record_error(operation);
        }
    }
}

#[async_trait]
impl<C: UserCache> UserCache for MeteredCache<C> {
    async fn get(&self, key: &CacheKey) -> Result<Option<User>, CacheError> {
        let start = Instant::now();
        let result = self.inner.get(key).await;
        self.finish("get", start, &result);

        match &result {
            Ok(Some(_)) => self.metrics.record_hit(),
            Ok(None) => self.metrics.record_miss(),
            Err(_) => {},
        }
        result
    }

    async fn set(&self, key: &CacheKey, user: &User) -> Result<(), CacheError> {
        let start = Instant::now();
        let result = self.inner.set(key, user).await;
        self.finish("set", start, &result);
        result
    }

    async fn del(&self, key: &CacheKey) -> Result<(), CacheError> {
        let start = Instant::now();
        let result = self.inner.del(key).await;
        self.finish("del", start, &result);
        result
    }

    async fn health_check(&self) -> Result<(), CacheError> {
        self.inner.health_check().await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
