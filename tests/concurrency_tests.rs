//! Concurrent use of the process-wide registry and the managed heap.
//!
//! This binary holds the only test touching its global registry, so the
//! indices handed out here are exactly `0..N`.

use std::collections::BTreeSet;
use std::thread;

use scriptext::global;
use scriptext::prelude::*;

const THREADS: usize = 8;
const PER_THREAD: usize = 50;

#[test]
fn test_concurrent_registration_is_dense_and_unique() {
    let indices: Vec<ExtensionIndex> = thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|t| {
                scope.spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| {
                            global::extend_with(ExtensionDescriptor::new(format!("t{t}_e{i}")))
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let unique: BTreeSet<u32> = indices.iter().map(|i| i.get()).collect();
    let expected: BTreeSet<u32> = (0..(THREADS * PER_THREAD) as u32).collect();
    assert_eq!(unique, expected);
    assert_eq!(global::registered_count(), THREADS * PER_THREAD);

    for index in indices {
        let ext = global::lookup_by_index(index).unwrap();
        assert_eq!(ext.index(), index);
    }
}

#[cfg(feature = "atomic-refcount")]
#[test]
fn test_concurrent_acquire_release_is_balanced() {
    use scriptext::{acquire_string, release_string};

    let mut heap = ManagedHeap::new();
    let s = heap.alloc_string("shared");
    let heap = &heap;

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(move || {
                let borrowed = heap.borrow_string(s).unwrap();
                for _ in 0..PER_THREAD {
                    let owned = acquire_string(heap, &borrowed).unwrap();
                    assert!(heap.string(s).is_some());
                    release_string(heap, owned);
                }
            });
        }
    });

    assert_eq!(heap.string_ref_count(s), Some(1));
}
