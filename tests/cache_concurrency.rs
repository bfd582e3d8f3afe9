// ==============================================
// CACHE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded stress for ConcurrentLruCache and SyncRecencyList. These
// require real thread interleavings and cannot live inline.

#![cfg(feature = "concurrency")]

use std::sync::{Arc, Barrier};
use std::thread;

use lrukit::cache::ConcurrentLruCache;
use lrukit::ds::SyncRecencyList;

// ==============================================
// Writers + Readers Under Capacity Bound
// ==============================================
//
// N writer threads insert distinct key ranges while readers hammer get.
// Whatever the interleaving, the cache must never exceed capacity and the
// index/list pair must stay consistent.

mod writer_reader_stress {
    use super::*;

    #[test]
    fn capacity_bound_holds_under_contention() {
        let capacity = 10;
        let writers = 4;
        let readers = 2;
        let inserts_per_writer = 2_000u64;

        let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(capacity);
        let barrier = Arc::new(Barrier::new(writers + readers));

        let mut handles = Vec::new();

        for tid in 0..writers as u64 {
            let cache = cache.clone();
            let barrier = barrier.clone();
            handles.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..inserts_per_writer {
                    let key = tid * inserts_per_writer + i;
                    cache.insert(key, key);
                    assert!(cache.len() <= capacity);
                }
            }));
        }

        for tid in 0..readers as u64 {
            let cache = cache.clone();
            let barrier = barrier.clone();
            handles.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..inserts_per_writer {
                    let key = (i * 7 + tid * 13) % (writers as u64 * inserts_per_writer);
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(*value, key);
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Promotion / Eviction Race
// ==============================================
//
// A tiny cache maximizes collisions between get-promotions and insert-driven
// evictions. Each iteration re-races a fresh cache from a barrier.

mod promotion_eviction_race {
    use super::*;

    #[test]
    fn promote_and_evict_never_corrupt_state() {
        let iterations = 300;

        for _ in 0..iterations {
            let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(2);
            cache.insert(1, 10);
            cache.insert(2, 20);

            let barrier = Arc::new(Barrier::new(3));

            let promoter = {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..50 {
                        cache.get(&1);
                    }
                })
            };

            let evictor = {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for key in 3..53u64 {
                        cache.insert(key, key * 10);
                    }
                })
            };

            let toucher = {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..50 {
                        cache.touch(&2);
                        cache.peek(&1);
                    }
                })
            };

            promoter.join().unwrap();
            evictor.join().unwrap();
            toucher.join().unwrap();

            assert!(cache.len() <= 2);
            cache.check_invariants().unwrap();

            // Every surviving value still matches its key.
            for key in 1..53u64 {
                if let Some(value) = cache.peek(&key) {
                    assert_eq!(*value, key * 10);
                }
            }
        }
    }
}

// ==============================================
// Clear While Inserting
// ==============================================

mod clear_race {
    use super::*;

    #[test]
    fn clear_during_inserts_leaves_consistent_state() {
        for _ in 0..200 {
            let cache: ConcurrentLruCache<u64, u64> = ConcurrentLruCache::new(8);
            let barrier = Arc::new(Barrier::new(2));

            let inserter = {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for key in 0..100u64 {
                        cache.insert(key, key);
                    }
                })
            };

            let clearer = {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..10 {
                        cache.clear();
                    }
                })
            };

            inserter.join().unwrap();
            clearer.join().unwrap();

            assert!(cache.len() <= 8);
            assert_eq!(cache.capacity(), 8);
            cache.check_invariants().unwrap();
        }
    }
}

// ==============================================
// SyncRecencyList Parallel Pushes
// ==============================================
//
// Threads push disjoint ranges; afterwards the list must hold exactly the
// union of all ranges, each value once.

mod sync_list_parallel_push {
    use super::*;

    #[test]
    fn concurrent_push_back_loses_nothing() {
        let threads = 5;
        let per_thread = 10_000u64;

        let list: Arc<SyncRecencyList<u64>> = Arc::new(SyncRecencyList::new());
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads as u64)
            .map(|tid| {
                let list = list.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let start = tid * per_thread;
                    for value in start..start + per_thread {
                        list.push_back(value);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let mut values = list.snapshot();
        values.sort_unstable();

        let expected: Vec<u64> = (0..threads as u64 * per_thread).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn concurrent_move_to_front_keeps_all_nodes() {
        let list: Arc<SyncRecencyList<u64>> = Arc::new(SyncRecencyList::new());
        let ids: Vec<_> = (0..64u64).map(|v| list.push_back(v)).collect();
        let ids = Arc::new(ids);
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4usize)
            .map(|tid| {
                let list = list.clone();
                let ids = ids.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for (i, &id) in ids.iter().enumerate() {
                        if i % 4 == tid {
                            assert!(list.move_to_front(id));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(list.len(), 64);
        let mut values = list.snapshot();
        values.sort_unstable();
        assert_eq!(values, (0..64u64).collect::<Vec<_>>());
    }
}
