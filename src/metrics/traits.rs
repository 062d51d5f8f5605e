//! # Metrics Traits
//!
//! Reading and publishing counters are separate concerns. Components count
//! with relaxed atomics in their hot paths; these traits only *snapshot* and
//! *export* what was counted.
//!
//! ```text
//!   ConversionCache ──┐                       ┌──► PrometheusTextExporter
//!   BufferPool ───────┼─► MetricsSnapshotProvider<S> ──► MetricsExporter<S>
//!   RegexPool ────────┘        (bench/test)          (production monitoring)
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use erakit::cache::ConversionCache;
//! use erakit::era::EraRegistry;
//! use erakit::metrics::snapshot::{ConversionCacheMetricsSnapshot, PoolMetricsSnapshot};
//! use erakit::metrics::traits::{MetricsReset, MetricsSnapshotProvider};
//! use erakit::pool::BufferPool;
//!
//! let cache = ConversionCache::new(8);
//! cache.set(2024, EraRegistry::BE, 2567);
//! cache.get(2024, EraRegistry::BE);
//!
//! let snap: ConversionCacheMetricsSnapshot = cache.snapshot();
//! assert_eq!(snap.get_hits, 1);
//! assert_eq!(snap.cache_len, 1);
//!
//! let buffers = BufferPool::new();
//! buffers.put(buffers.get(16));
//! buffers.reset_metrics();
//! let snap: PoolMetricsSnapshot = buffers.snapshot();
//! assert_eq!(snap.get_calls, 0);
//! assert_eq!(snap.idle, 1);
//! ```
//!
//! Cache counters have no standalone reset: `ConversionCache::clear` zeroes
//! them together with the entries.

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
