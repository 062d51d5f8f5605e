//! Pool of reusable `String` buffers for text assembly.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::pool::BufferPool;
//!
//! let pool = BufferPool::new();
//!
//! // Guard style: the buffer goes back to the pool when `out` drops.
//! let text = {
//!     let mut out = pool.checkout(32);
//!     out.push_str("2567");
//!     out.push_str(" BE");
//!     out.to_string()
//! };
//! assert_eq!(text, "2567 BE");
//!
//! // Explicit style.
//! let buf = pool.get(16);
//! assert!(buf.is_empty());
//! pool.put(buf);
//!
//! let stats = pool.stats();
//! assert_eq!(stats.gets, 2);
//! assert_eq!(stats.puts, 2);
//! ```
//!
//! ## Retention
//!
//! New buffers start with [`DEFAULT_BUFFER_CAPACITY`] bytes. Buffers that grew
//! past [`MAX_RETAINED_CAPACITY`] are dropped on `put` instead of being kept,
//! so one oversized string does not pin memory for the life of the pool.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::pool::object::ObjectPool;
use crate::pool::{PoolCounters, PoolStats};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::PoolMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};

/// Capacity of freshly allocated buffers, in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Buffers with a larger capacity are discarded on `put`.
pub const MAX_RETAINED_CAPACITY: usize = 4096;

/// Thread-safe pool of `String` buffers.
pub struct BufferPool {
    idle: ObjectPool<String>,
    counters: PoolCounters,
}

impl BufferPool {
    /// Creates a pool with one free-list shard per core.
    pub fn new() -> Self {
        Self {
            idle: ObjectPool::with_default_shards(),
            counters: PoolCounters::default(),
        }
    }

    /// Creates a pool with an explicit shard layout.
    pub fn with_shards(shards: usize, per_shard_limit: usize) -> Self {
        Self {
            idle: ObjectPool::new(shards, per_shard_limit),
            counters: PoolCounters::default(),
        }
    }

    /// Checks out an empty buffer with at least `capacity_hint` bytes of
    /// capacity (and never less than [`DEFAULT_BUFFER_CAPACITY`]).
    pub fn get(&self, capacity_hint: usize) -> String {
        self.counters.record_get();
        let mut buf = match self.idle.pop() {
            Some(buf) => buf,
            None => {
                self.counters.record_allocation();
                String::with_capacity(DEFAULT_BUFFER_CAPACITY)
            },
        };
        buf.clear();
        if capacity_hint > buf.capacity() {
            buf.reserve(capacity_hint);
        }
        buf
    }

    /// Returns a buffer for reuse, dropping it if it grew too large.
    pub fn put(&self, mut buf: String) {
        self.counters.record_put();
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            trace!(
                capacity = buf.capacity(),
                max = MAX_RETAINED_CAPACITY,
                "discarding oversized buffer"
            );
            return;
        }
        buf.clear();
        self.idle.push(buf);
    }

    /// Checks out a buffer wrapped in a guard that returns it on drop.
    pub fn checkout(&self, capacity_hint: usize) -> PooledBuffer<'_> {
        PooledBuffer {
            pool: Some(self),
            buf: self.get(capacity_hint),
        }
    }

    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Number of idle buffers currently retained.
    pub fn idle(&self) -> usize {
        self.idle.idle()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<PoolMetricsSnapshot> for BufferPool {
    fn snapshot(&self) -> PoolMetricsSnapshot {
        PoolMetricsSnapshot::from_stats(self.stats(), self.idle())
    }
}

#[cfg(feature = "metrics")]
impl MetricsReset for BufferPool {
    fn reset_metrics(&self) {
        self.reset_stats();
    }
}

/// A checked-out buffer. Derefs to `String`; returns to its pool on drop.
pub struct PooledBuffer<'a> {
    pool: Option<&'a BufferPool>,
    buf: String,
}

impl PooledBuffer<'_> {
    /// Takes ownership of the buffer; it will not be returned to the pool.
    pub fn detach(mut self) -> String {
        self.pool = None;
        std::mem::take(&mut self.buf)
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.put(std::mem::take(&mut self.buf));
        }
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buf).finish()
    }
}

impl Default for PooledBuffer<'_> {
    /// A detached, empty buffer with no pool to return to.
    fn default() -> Self {
        Self {
            pool: None,
            buf: String::new(),
        }
    }
}
