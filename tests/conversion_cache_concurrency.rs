// ==============================================
// CONVERSION CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded checks for ConversionCache: counter accounting, bounded
// size under racing writers, and clear() racing with get/set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use erakit::cache::{CacheStats, ConversionCache};
use erakit::era::EraRegistry;

const BE: erakit::era::EraId = EraRegistry::BE;
const CE: erakit::era::EraId = EraRegistry::CE;

fn be(year: i64) -> i64 {
    year + 543
}

// ==============================================
// Counter accounting
// ==============================================

mod accounting {
    use super::*;

    #[test]
    fn every_get_is_a_hit_or_a_miss() {
        let cache = Arc::new(ConversionCache::new(64));
        let threads = 8;
        let gets_per_thread = 2_000u64;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..gets_per_thread {
                        let year = 1900 + ((i as i64 * 7 + t as i64) % 200);
                        if cache.get(year, BE).is_none() {
                            cache.set(year, BE, be(year));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(stats.lookups(), threads as u64 * gets_per_thread);
        assert!(stats.hits > 0);
        assert!(stats.misses > 0);
        let rate = stats.hit_rate();
        assert!((0.0..=1.0).contains(&rate));
    }

    #[test]
    fn values_are_never_mixed_between_eras() {
        let cache = Arc::new(ConversionCache::new(32));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..5_000i64 {
                        let year = 2000 + (i % 50);
                        let era = if (i + t) % 2 == 0 { BE } else { CE };
                        let expected = if era == BE { be(year) } else { year };
                        match cache.get(year, era) {
                            Some(value) => assert_eq!(value, expected),
                            None => cache.set(year, era, expected),
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}

// ==============================================
// Bounded size
// ==============================================
//
// set() publishes before it evicts, so size may briefly exceed capacity
// while writers race. Once they stop, it is back within capacity.

mod bounded {
    use super::*;

    #[test]
    fn size_returns_within_capacity_after_writers_finish() {
        let capacity = 16;
        let writers = 8;
        let per_writer = 5_000i64;
        let cache = Arc::new(ConversionCache::new(capacity));
        let barrier = Arc::new(Barrier::new(writers));

        let handles: Vec<_> = (0..writers)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..per_writer {
                        let year = t as i64 * 10_000 + i;
                        cache.set(year, BE, be(year));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), capacity);
        cache.check_invariants().unwrap();

        // Every key is distinct, so each insert past capacity evicts one.
        let inserted = writers as u64 * per_writer as u64;
        assert_eq!(cache.stats().evictions, inserted - capacity as u64);
    }

    #[test]
    fn overshoot_while_writing_stays_within_writer_count() {
        let capacity = 32;
        let writers = 4;
        let per_writer = 20_000i64;
        let cache = Arc::new(ConversionCache::new(capacity));
        let barrier = Arc::new(Barrier::new(writers + 1));
        let done = Arc::new(AtomicBool::new(false));

        let sampler = {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                barrier.wait();
                let mut peak = 0;
                while !done.load(Ordering::Acquire) {
                    peak = peak.max(cache.len());
                }
                peak
            })
        };

        let handles: Vec<_> = (0..writers)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..per_writer {
                        let year = t as i64 * 100_000 + i;
                        cache.set(year, BE, be(year));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        done.store(true, Ordering::Release);
        let peak = sampler.join().unwrap();

        assert!(
            peak <= capacity + writers,
            "observed {peak} entries with capacity {capacity} and {writers} writers"
        );
        assert_eq!(cache.len(), capacity);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn readers_never_see_a_value_for_the_wrong_key() {
        let cache = Arc::new(ConversionCache::new(8));
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let cache = Arc::clone(&cache);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..20_000i64 {
                    let year = i % 64;
                    cache.set(year, BE, be(year));
                }
                done.store(true, Ordering::Release);
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    let mut year = 0;
                    while !done.load(Ordering::Acquire) {
                        if let Some(value) = cache.get(year, BE) {
                            assert_eq!(value, be(year));
                        }
                        year = (year + 1) % 64;
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert!(cache.len() <= 8);
    }

    #[test]
    fn same_key_writers_do_not_evict() {
        let cache = Arc::new(ConversionCache::new(4));
        for year in 0..4 {
            cache.set(year, CE, year);
        }
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..1_000 {
                        cache.set(2, CE, 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.len(), 4);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// clear() racing with readers and writers
// ==============================================

mod clear_race {
    use super::*;

    #[test]
    fn clear_during_traffic_leaves_a_consistent_cache() {
        let cache = Arc::new(ConversionCache::new(32));
        let barrier = Arc::new(Barrier::new(5));

        let workers: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..5_000i64 {
                        let year = (i * 13 + t) % 100;
                        match cache.get(year, BE) {
                            Some(value) => assert_eq!(value, be(year)),
                            None => cache.set(year, BE, be(year)),
                        }
                    }
                })
            })
            .collect();

        let clearer = {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    cache.clear();
                    thread::yield_now();
                }
            })
        };

        for handle in workers {
            handle.join().unwrap();
        }
        clearer.join().unwrap();

        assert!(cache.len() <= cache.capacity());
        cache.check_invariants().unwrap();

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
