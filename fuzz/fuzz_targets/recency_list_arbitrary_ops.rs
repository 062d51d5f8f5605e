#![no_main]

use std::collections::VecDeque;

use erakit::ds::RecencyList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on RecencyList
//
// Mirrors every operation on a VecDeque model (front = most recent) and
// checks order, length and structural invariants after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut model: VecDeque<u8> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let key = pair[1] % 32;

        match op {
            0 => {
                // push_front (moves an existing key)
                let inserted = list.push_front(key);
                let existed = model.iter().position(|&k| k == key);
                assert_eq!(inserted, existed.is_none());
                if let Some(pos) = existed {
                    model.remove(pos);
                }
                model.push_front(key);
            }
            1 => {
                // touch
                let found = list.touch(&key);
                match model.iter().position(|&k| k == key) {
                    Some(pos) => {
                        assert!(found);
                        model.remove(pos);
                        model.push_front(key);
                    }
                    None => assert!(!found),
                }
            }
            2 => {
                // pop_back
                assert_eq!(list.pop_back(), model.pop_back());
            }
            3 => {
                // remove
                let removed = list.remove(&key);
                match model.iter().position(|&k| k == key) {
                    Some(pos) => {
                        assert!(removed);
                        model.remove(pos);
                    }
                    None => assert!(!removed),
                }
            }
            4 => {
                // contains / front / back (read-only)
                assert_eq!(list.contains(&key), model.contains(&key));
                assert_eq!(list.front(), model.front());
                assert_eq!(list.back(), model.back());
            }
            5 => {
                // clear (rarely, so sequences can grow)
                if key == 0 {
                    list.clear();
                    model.clear();
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert!(list.check_invariants().is_ok());
    }

    assert!(list.iter().copied().eq(model.iter().copied()));
});
