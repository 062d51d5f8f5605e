//! # Bounded concurrent year-conversion cache
//!
//! [`ConversionCache`] memoizes `(year, era) -> converted year` so the
//! formatting and parsing layers do not repeat era arithmetic for years they
//! have already seen. It is bounded, evicts least-recently-used entries and
//! counts hits, misses and evictions.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          ConversionCache                             │
//!   │                                                                      │
//!   │   map: ArcSwap<DashMap<ConversionKey, i64>>                          │
//!   │        │  wait-free load on every access; clear() stores a fresh     │
//!   │        │  map with one atomic pointer swap                           │
//!   │        ▼                                                             │
//!   │   ┌────────────────────────────────────────────────────────────────┐ │
//!   │   │ DashMap (sharded): get/insert never take a cache-wide lock     │ │
//!   │   └────────────────────────────────────────────────────────────────┘ │
//!   │                                                                      │
//!   │   recency: Mutex<RecencyList<ConversionKey>>                         │
//!   │        head ──► [2024/BE] ◄──► [2023/BE] ◄──► [1999/CE] ◄── tail     │
//!   │                   MRU                           LRU                  │
//!   │                                                                      │
//!   │   hits / misses / evictions: AtomicU64                               │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method               | Locks                                  |
//! |----------------------|----------------------------------------|
//! | `get`                | map shard read; `try_lock` to promote  |
//! | `set`                | map shard write, then recency `Mutex`  |
//! | `clear`              | recency `Mutex` + atomic map swap      |
//! | `stats` / `hit_rate` | none (atomic loads)                    |
//!
//! ## Approximate recency
//!
//! Hits dominate this workload, so `get` never waits for the recency lock:
//! it promotes the key only if the lock happens to be free. `set` publishes
//! into the map *before* taking the recency lock, which leaves a narrow
//! window where the map briefly holds more than `capacity` entries until the
//! eviction catches up. The overshoot is bounded by the number of concurrent
//! writers. Eviction always removes the tail of the recency list, which is
//! never the most recently inserted key.
//!
//! ## Failure semantics
//!
//! Nothing here returns an error. Racing evictions of an already-removed key
//! are ignored, and any inconsistency degrades to a miss and a recompute.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::cache::ConversionCache;
//! use erakit::era::EraRegistry;
//!
//! let cache = ConversionCache::new(1024);
//! let be = EraRegistry::BE;
//!
//! assert_eq!(cache.get(2024, be), None);
//! cache.set(2024, be, 2567);
//! assert_eq!(cache.get(2024, be), Some(2567));
//!
//! let year = cache.get_or_insert_with(2025, be, || 2025 + 543);
//! assert_eq!(year, 2568);
//!
//! let stats = cache.stats();
//! assert_eq!((stats.hits, stats.misses), (1, 2));
//! ```

use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use arc_swap::Guard;
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use tracing::{debug, trace};

use crate::ds::RecencyList;
use crate::era::EraId;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ConversionCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;

/// Capacity used when `0` is requested.
pub const DEFAULT_CAPACITY: usize = 1024;

type FxBuild = BuildHasherDefault<FxHasher>;
type Map = DashMap<ConversionKey, i64, FxBuild>;

/// Cache key: a year in the source numbering system plus the target era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionKey {
    pub year: i64,
    pub era: EraId,
}

impl ConversionKey {
    pub fn new(year: i64, era: EraId) -> Self {
        Self { year, era }
    }
}

/// Point-in-time cache counters. Reset only by [`ConversionCache::clear`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// `hits / (hits + misses)`, or `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Counters {
    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

/// Bounded, thread-safe LRU cache of year conversions.
pub struct ConversionCache {
    map: ArcSwap<Map>,
    recency: Mutex<RecencyList<ConversionKey>>,
    counters: Counters,
    capacity: usize,
}

impl ConversionCache {
    /// Creates a cache holding at most `capacity` entries
    /// (`0` means [`DEFAULT_CAPACITY`]).
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        debug!(capacity, "created conversion cache");
        Self {
            map: ArcSwap::from_pointee(Self::fresh_map(capacity)),
            recency: Mutex::new(RecencyList::with_capacity(capacity)),
            counters: Counters::default(),
            capacity,
        }
    }

    fn fresh_map(capacity: usize) -> Map {
        DashMap::with_capacity_and_hasher(capacity, FxBuild::default())
    }

    /// Current backing map. Loading never blocks; a concurrent `clear`
    /// swaps the pointer while lookups in flight keep the old map alive.
    #[inline]
    fn current(&self) -> Guard<Arc<Map>> {
        self.map.load()
    }

    /// Looks up a cached conversion.
    ///
    /// A hit also promotes the key to most recently used when the recency
    /// lock is free; a busy lock skips the promotion instead of waiting.
    pub fn get(&self, year: i64, era: EraId) -> Option<i64> {
        let key = ConversionKey::new(year, era);
        let found = self.current().get(&key).map(|entry| *entry.value());

        match found {
            Some(value) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                if let Some(mut recency) = self.recency.try_lock() {
                    recency.touch(&key);
                }
                Some(value)
            },
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            },
        }
    }

    /// Publishes a conversion, evicting the least recently used entry when
    /// the cache is full.
    ///
    /// Setting an existing key republishes the value and marks it as most
    /// recently used without evicting anything.
    pub fn set(&self, year: i64, era: EraId, value: i64) {
        let key = ConversionKey::new(year, era);
        self.current().insert(key, value);

        let mut recency = self.recency.lock();
        if recency.touch(&key) {
            return;
        }
        if recency.len() >= self.capacity {
            if let Some(victim) = recency.pop_back() {
                if self.current().remove(&victim).is_some() {
                    self.counters.evictions.fetch_add(1, Ordering::Relaxed);
                    trace!(year = victim.year, era = %victim.era, "evicted conversion");
                }
            }
        }
        // A racing eviction may have removed the value published above
        // before this key was tracked.
        self.current().entry(key).or_insert(value);
        recency.push_front(key);
    }

    /// Returns the cached conversion, computing and caching it on a miss.
    pub fn get_or_insert_with<F>(&self, year: i64, era: EraId, compute: F) -> i64
    where
        F: FnOnce() -> i64,
    {
        if let Some(value) = self.get(year, era) {
            return value;
        }
        let value = compute();
        self.set(year, era, value);
        value
    }

    /// Reports whether a conversion is cached, without touching counters or
    /// recency.
    pub fn contains(&self, year: i64, era: EraId) -> bool {
        self.current().contains_key(&ConversionKey::new(year, era))
    }

    /// Drops every entry and zeroes all counters.
    ///
    /// The backing map is replaced, not emptied in place: concurrent readers
    /// see either the old map or the new empty one, never a partial clear.
    pub fn clear(&self) {
        let fresh = Arc::new(Self::fresh_map(self.capacity));
        let mut recency = self.recency.lock();
        let old = self.map.swap(fresh);
        recency.clear();
        self.counters.reset();
        drop(recency);
        debug!(dropped = old.len(), "cleared conversion cache");
    }

    /// Snapshot of hit, miss and eviction counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }

    /// Hit rate in `[0, 1]`; `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// Number of entries in the backing map.
    ///
    /// Under concurrent `set` this may briefly exceed
    /// [`capacity`](Self::capacity); see the module docs.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks recency-list integrity and that every tracked key is cached.
    ///
    /// Only meaningful while no other thread is inside `set` or `clear`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let recency = self.recency.lock();
        recency.check_invariants()?;

        let map = self.map.load_full();
        if recency.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "recency list holds {} keys, capacity is {}",
                recency.len(),
                self.capacity
            )));
        }
        if map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "map holds {} entries, capacity is {}",
                map.len(),
                self.capacity
            )));
        }
        if let Some(key) = recency.iter().find(|key| !map.contains_key(*key)) {
            return Err(InvariantError::new(format!(
                "tracked key {}/{} missing from map",
                key.year, key.era
            )));
        }
        Ok(())
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for ConversionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<ConversionCacheMetricsSnapshot> for ConversionCache {
    fn snapshot(&self) -> ConversionCacheMetricsSnapshot {
        ConversionCacheMetricsSnapshot::from_stats(self.stats(), self.len(), self.capacity)
    }
}
