#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz property-based tests for RecencyList
//
// Tests specific invariants and properties:
// - FIFO ordering (push_back + pop_front)
// - LIFO ordering (push_front + pop_front)
// - move_to_front behavior
// - Remove consistency
// - Clear operation correctness
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let test_type = data[0] % 5;

    match test_type {
        0 => test_fifo_ordering(&data[1..]),
        1 => test_lifo_ordering(&data[1..]),
        2 => test_move_to_front(&data[1..]),
        3 => test_remove_consistency(&data[1..]),
        4 => test_clear_operation(&data[1..]),
        _ => unreachable!(),
    }
});

// Property: FIFO ordering - push_back + pop_front preserves order
fn test_fifo_ordering(data: &[u8]) {
    let mut list: RecencyList<u32> = RecencyList::new();

    for &byte in data {
        list.push_back(u32::from(byte));
    }

    for &byte in data {
        let expected = u32::from(byte);
        assert_eq!(list.pop_front(), Some(expected));
    }

    assert!(list.is_empty());
}

// Property: LIFO ordering - push_front + pop_front returns reverse order
fn test_lifo_ordering(data: &[u8]) {
    let mut list: RecencyList<u32> = RecencyList::new();

    for &byte in data {
        list.push_front(u32::from(byte));
    }

    for &byte in data.iter().rev() {
        let expected = u32::from(byte);
        assert_eq!(list.pop_front(), Some(expected));
    }

    assert!(list.is_empty());
}

// Property: move_to_front puts the node at the front without changing length
fn test_move_to_front(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    for &byte in data {
        let value = u32::from(byte);
        let id = list.push_back(value);
        ids.push((id, value));
    }

    let len = list.len();
    for (id, value) in ids {
        if list.contains(id) {
            assert!(list.move_to_front(id));
            assert_eq!(list.front(), Some(&value));
            assert_eq!(list.front_id(), Some(id));
            assert_eq!(list.len(), len);
        }
    }
}

// Property: remove decreases length and makes the handle invalid
fn test_remove_consistency(data: &[u8]) {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    for &byte in data {
        let value = u32::from(byte);
        let id = list.push_back(value);
        ids.push((id, value));
    }

    for (id, value) in ids {
        if list.contains(id) {
            let old_len = list.len();
            let removed = list.remove(id);

            assert_eq!(removed, Some(value));
            assert_eq!(list.len(), old_len - 1);
            assert!(!list.contains(id));
            assert_eq!(list.get(id), None);
            assert!(!list.move_to_front(id));
        }
    }

    assert!(list.is_empty());
}

// Property: clear resets state and invalidates every outstanding handle
fn test_clear_operation(data: &[u8]) {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids = Vec::new();

    let mut idx = 0;
    while idx < data.len() {
        let push_count = ((data[idx] as usize) % 10).min(data.len() - idx - 1);

        for i in 0..push_count {
            if idx + i + 1 >= data.len() {
                break;
            }
            let value = u32::from(data[idx + i + 1]);
            ids.push(list.push_back(value));
        }

        idx += push_count + 1;

        if idx >= data.len() {
            break;
        }

        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);

        for id in &ids {
            assert!(!list.contains(*id));
            assert_eq!(list.get(*id), None);
        }

        ids.clear();
        idx += 1;
    }
}
