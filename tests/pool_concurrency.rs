// ==============================================
// POOL CONCURRENCY TESTS (integration)
// ==============================================
//
// BufferPool and RegexPool under many threads: every checkout is checked
// back in, contents never leak between callers, and retention stays within
// the configured shard limits.

use std::sync::{Arc, Barrier};
use std::thread;

use erakit::pool::{BufferPool, RegexPool};

const THREADS: usize = 8;
const ROUNDS: usize = 2_000;

fn run_on_threads<F>(f: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let f = Arc::clone(&f);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                f(t);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

mod buffers {
    use super::*;

    #[test]
    fn buffers_come_back_empty_and_balanced() {
        let pool = Arc::new(BufferPool::with_shards(4, 8));
        {
            let pool = Arc::clone(&pool);
            run_on_threads(move |t| {
                for i in 0..ROUNDS {
                    let mut out = pool.checkout(32);
                    assert!(out.is_empty(), "buffer handed out with stale contents");
                    out.push_str(&format!("thread {t} round {i}"));
                }
            });
        }

        let stats = pool.stats();
        assert_eq!(stats.gets, (THREADS * ROUNDS) as u64);
        assert_eq!(stats.puts, stats.gets);
        assert!(stats.allocations <= stats.gets);
        assert!(pool.idle() <= 4 * 8);
    }

    #[test]
    fn detached_buffers_are_not_counted_as_returned() {
        let pool = Arc::new(BufferPool::with_shards(2, 4));
        {
            let pool = Arc::clone(&pool);
            run_on_threads(move |_| {
                for i in 0..ROUNDS {
                    let mut out = pool.checkout(8);
                    out.push('x');
                    if i % 2 == 0 {
                        assert_eq!(out.detach(), "x");
                    }
                }
            });
        }

        let stats = pool.stats();
        assert_eq!(stats.gets, (THREADS * ROUNDS) as u64);
        assert_eq!(stats.puts, stats.gets / 2);
    }
}

mod matchers {
    use super::*;

    #[test]
    fn concurrent_rewrites_are_independent() {
        let pool = Arc::new(RegexPool::new(r"\b\d{4}\b").unwrap());
        {
            let pool = Arc::clone(&pool);
            run_on_threads(move |t| {
                for i in 0..ROUNDS {
                    let year = 1900 + ((t * ROUNDS + i) % 200);
                    let text = format!("{year}-01-01 and {} later", year + 1);
                    let out = pool.replace_all_with(&text, |m| {
                        let ce: i64 = m.parse().unwrap();
                        (ce + 543).to_string()
                    });
                    assert_eq!(out, format!("{}-01-01 and {} later", year + 543, year + 544));
                    assert_eq!(pool.find_all(&text, None).len(), 2);
                }
            });
        }

        let stats = pool.stats();
        assert_eq!(stats.gets, (THREADS * ROUNDS * 2) as u64);
        assert_eq!(stats.puts, stats.gets);
        assert!(stats.allocations <= stats.gets);
    }

    #[test]
    fn panicking_callers_still_return_matchers() {
        let pool = Arc::new(RegexPool::new(r"\d+").unwrap());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    pool.replace_all_with("42", |_| panic!("conversion failed"));
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_err());
        }

        let stats = pool.stats();
        assert_eq!(stats.gets, THREADS as u64);
        assert_eq!(stats.puts, THREADS as u64);
        assert!(pool.is_match("7"));
    }
}
