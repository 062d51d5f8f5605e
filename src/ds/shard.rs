//! Deterministic key-to-shard mapping.
//!
//! Used by [`ObjectPool`](crate::pool::ObjectPool) to give every thread a
//! home free-list shard, so threads that check objects in and out at the
//! same time usually touch different locks.
//!
//! ```text
//!   ThreadId ──► hash(seed, id) % shards ──► home shard
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   │ T1, T5  │ T2      │ T3, T6  │ T4      │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use erakit::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 0);
//! let shard = selector.shard_for_key(&"buffer");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"buffer"), shard);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maps any `Hash` key to a shard index in `[0, shards)`.
///
/// The same `(key, seed, shards)` always yields the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards; zero is clamped to one.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }

    /// Home shard of the calling thread.
    pub fn shard_for_current_thread(&self) -> usize {
        if self.shards == 1 {
            return 0;
        }
        self.shard_for_key(&std::thread::current().id())
    }
}

impl Default for ShardSelector {
    /// Single shard, seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
