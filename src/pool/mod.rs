//! Object pools used during text assembly and year rewriting.
//!
//! | Pool           | Recycles                    | Guard            |
//! |----------------|-----------------------------|------------------|
//! | [`BufferPool`] | `String` output buffers     | [`PooledBuffer`] |
//! | [`RegexPool`]  | clones of one compiled regex| [`PooledRegex`]  |
//!
//! Both keep their idle objects in a sharded [`ObjectPool`] and count
//! checkouts, check-ins and fresh allocations in [`PoolStats`].

pub mod buffer;
pub mod matcher;
pub mod object;

use std::sync::atomic::{AtomicU64, Ordering};

pub use buffer::{BufferPool, PooledBuffer};
pub use matcher::{PooledRegex, RegexPool};
pub use object::ObjectPool;

/// Point-in-time pool counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Checkouts.
    pub gets: u64,
    /// Check-ins, including objects that were then discarded.
    pub puts: u64,
    /// Checkouts that found no idle object and allocated a new one.
    pub allocations: u64,
}

impl PoolStats {
    /// Fraction of checkouts served from the pool, in `[0, 1]`.
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            return 0.0;
        }
        let reused = self.gets.saturating_sub(self.allocations);
        reused as f64 / self.gets as f64
    }
}

#[derive(Debug, Default)]
pub(crate) struct PoolCounters {
    gets: AtomicU64,
    puts: AtomicU64,
    allocations: AtomicU64,
}

impl PoolCounters {
    #[inline]
    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_allocation(&self) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            gets: self.gets.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.gets.store(0, Ordering::Relaxed);
        self.puts.store(0, Ordering::Relaxed);
        self.allocations.store(0, Ordering::Relaxed);
    }
}
