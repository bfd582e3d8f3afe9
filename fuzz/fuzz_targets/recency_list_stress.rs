#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;
use std::collections::VecDeque;

// Fuzz stress test with arbitrary operation sequences and a VecDeque
// reference implementation to ensure ordering correctness. Promotions and
// interior removals pick their target node by position so that every link
// path (front, interior, back) gets exercised.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut reference: VecDeque<u32> = VecDeque::new();

    for (idx, &byte) in data.iter().enumerate() {
        let value = u32::from(byte);
        let op = idx % 6;

        match op {
            0 => {
                list.push_back(value);
                reference.push_back(value);
            }
            1 => {
                list.push_front(value);
                reference.push_front(value);
            }
            2 => {
                let list_val = list.pop_front();
                let ref_val = reference.pop_front();
                assert_eq!(list_val, ref_val);
            }
            3 => {
                let list_val = list.pop_back();
                let ref_val = reference.pop_back();
                assert_eq!(list_val, ref_val);
            }
            4 => {
                // move an arbitrary node to the front
                if !list.is_empty() {
                    let pos = value as usize % list.len();
                    let id = list.iter_ids().nth(pos).unwrap();
                    assert!(list.move_to_front(id));
                    let moved = reference.remove(pos).unwrap();
                    reference.push_front(moved);
                }
            }
            5 => {
                // remove an arbitrary node
                if !list.is_empty() {
                    let pos = value as usize % list.len();
                    let id = list.iter_ids().nth(pos).unwrap();
                    assert_eq!(list.remove(id), reference.remove(pos));
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), reference.len());
        assert_eq!(list.front(), reference.front());
        assert_eq!(list.back(), reference.back());
        assert_eq!(list.is_empty(), reference.is_empty());

        #[cfg(debug_assertions)]
        list.debug_validate_invariants();
    }

    // Full ordering must match once the dust settles.
    let final_order: Vec<u32> = list.iter().copied().collect();
    let expected: Vec<u32> = reference.iter().copied().collect();
    assert_eq!(final_order, expected);
});
