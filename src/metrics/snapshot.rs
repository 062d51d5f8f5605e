use crate::cache::CacheStats;
use crate::pool::PoolStats;

/// Conversion-cache counters plus gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ConversionCacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub evicted_entries: u64,

    pub hit_rate: f64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl ConversionCacheMetricsSnapshot {
    pub(crate) fn from_stats(stats: CacheStats, cache_len: usize, capacity: usize) -> Self {
        Self {
            get_calls: stats.lookups(),
            get_hits: stats.hits,
            get_misses: stats.misses,
            evicted_entries: stats.evictions,
            hit_rate: stats.hit_rate(),
            cache_len,
            capacity,
        }
    }
}

/// Object-pool counters plus the idle gauge.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PoolMetricsSnapshot {
    pub get_calls: u64,
    pub put_calls: u64,
    pub allocations: u64,
    pub reuse_rate: f64,

    pub idle: usize,
}

impl PoolMetricsSnapshot {
    pub(crate) fn from_stats(stats: PoolStats, idle: usize) -> Self {
        Self {
            get_calls: stats.gets,
            put_calls: stats.puts,
            allocations: stats.allocations,
            reuse_rate: stats.hit_rate(),
            idle,
        }
    }
}
