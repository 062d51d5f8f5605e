#![no_main]

use erakit::cache::ConversionCache;
use erakit::era::EraRegistry;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary get/set/clear sequences on a single-threaded ConversionCache
//
// First byte picks the capacity. Checks the size bound, that cached values
// are the ones written, and the hit/miss accounting.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let cache = ConversionCache::new(capacity);
    let mut gets = 0u64;

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 8;
        let year = i64::from(pair[1] % 40) - 5;
        let era = if pair[0] & 0x80 == 0 { EraRegistry::BE } else { EraRegistry::CE };
        let converted = if era == EraRegistry::BE { year + 543 } else { year };

        match op {
            0..=3 => {
                cache.set(year, era, converted);
                assert!(cache.contains(year, era));
            }
            4..=6 => {
                gets += 1;
                if let Some(value) = cache.get(year, era) {
                    assert_eq!(value, converted);
                }
            }
            7 => {
                cache.clear();
                gets = 0;
                assert!(cache.is_empty());
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.stats().lookups(), gets);
    }

    assert!(cache.check_invariants().is_ok());
});
