//! Sharded, non-blocking free list shared by the buffer and regex pools.
//!
//! ## Architecture
//!
//! ```text
//!   caller thread ──► ShardSelector ──► home shard
//!                                          │ try_lock
//!                                          ▼
//!   ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!   │ Mutex<Vec<T>>│ Mutex<Vec<T>>│ Mutex<Vec<T>>│ Mutex<Vec<T>>│
//!   └──────────────┴──────────────┴──────────────┴──────────────┘
//!          ▲ busy? walk to the next shard, never wait
//! ```
//!
//! `pop` and `push` only ever `try_lock`. A caller that finds every shard
//! busy gets `None` from `pop` (and allocates a fresh object) or has its
//! object dropped by `push`. Pools therefore never block and never run dry.
//!
//! Each shard keeps at most `per_shard_limit` idle objects; extra objects
//! handed to `push` are dropped.

use std::fmt;

use parking_lot::Mutex;

use crate::ds::ShardSelector;

/// Idle objects kept per shard unless configured otherwise.
pub const DEFAULT_PER_SHARD_LIMIT: usize = 64;

/// Upper bound for the automatically chosen shard count.
const MAX_DEFAULT_SHARDS: usize = 32;

/// Thread-sharded stack of idle objects.
pub struct ObjectPool<T> {
    shards: Box<[Mutex<Vec<T>>]>,
    selector: ShardSelector,
    per_shard_limit: usize,
}

impl<T> ObjectPool<T> {
    /// Creates a pool with `shards` free lists (clamped to at least one).
    pub fn new(shards: usize, per_shard_limit: usize) -> Self {
        let selector = ShardSelector::new(shards, 0);
        let shards = (0..selector.shard_count())
            .map(|_| Mutex::new(Vec::new()))
            .collect();
        Self {
            shards,
            selector,
            per_shard_limit,
        }
    }

    /// One shard per available core, capped, with the default shard limit.
    pub fn with_default_shards() -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(cores.min(MAX_DEFAULT_SHARDS), DEFAULT_PER_SHARD_LIMIT)
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn per_shard_limit(&self) -> usize {
        self.per_shard_limit
    }

    /// Takes an idle object, preferring the caller's home shard.
    pub fn pop(&self) -> Option<T> {
        let home = self.selector.shard_for_current_thread();
        let n = self.shards.len();
        (0..n).find_map(|step| {
            self.shards[(home + step) % n]
                .try_lock()
                .and_then(|mut free| free.pop())
        })
    }

    /// Returns an object for reuse.
    ///
    /// Returns `false` if the object was dropped because every reachable
    /// shard was full or busy.
    pub fn push(&self, item: T) -> bool {
        let home = self.selector.shard_for_current_thread();
        let n = self.shards.len();
        for step in 0..n {
            if let Some(mut free) = self.shards[(home + step) % n].try_lock() {
                if free.len() < self.per_shard_limit {
                    free.push(item);
                    return true;
                }
            }
        }
        false
    }

    /// Number of idle objects across all shards.
    ///
    /// Takes each shard lock in turn; meant for diagnostics and tests.
    pub fn idle(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Drops every idle object.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::with_default_shards()
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("shards", &self.shards.len())
            .field("per_shard_limit", &self.per_shard_limit)
            .finish_non_exhaustive()
    }
}
