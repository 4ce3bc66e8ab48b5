//! Integration tests for the process-wide registry.
//!
//! Tests in this binary share one global registry and may run in parallel,
//! so each one only asserts on the indices and names it registered itself.

use scriptext::prelude::*;
use scriptext::{ResultSlot, global, math};

#[test]
fn test_extend_with_assigns_increasing_indices() {
    let first = global::extend_with(ExtensionDescriptor::new("global_it_first")).unwrap();
    let second = global::extend_with(ExtensionDescriptor::new("global_it_second")).unwrap();
    assert!(second > first);

    assert_eq!(global::lookup_by_index(first).unwrap().name(), "global_it_first");
    assert_eq!(global::lookup_by_index(second).unwrap().name(), "global_it_second");
    assert!(global::registered_count() >= 2);
}

#[test]
fn test_find_extension_prefers_latest() {
    let old = global::extend_with(ExtensionDescriptor::new("global_it_dup")).unwrap();
    let new = global::extend_with(ExtensionDescriptor::new("global_it_dup")).unwrap();
    assert_ne!(old, new);
    assert_eq!(global::find_extension("global_it_dup").unwrap().index(), new);

    let all = global::with_registry(|r| {
        r.find_all("global_it_dup")
            .iter()
            .map(|e| e.index())
            .collect::<Vec<_>>()
    });
    assert_eq!(all, vec![old, new]);
}

#[test]
fn test_global_call() {
    let results = ResultSlot::new();
    let index = global::extend_with(math::extension(&results)).unwrap();
    let heap = ManagedHeap::new();

    global::call(index, "add", &[EngineValue::Number(40.0), EngineValue::Number(2.0)], &heap)
        .unwrap();
    assert_eq!(results.take(), Some(FieldValue::UInt32(42)));

    assert!(matches!(
        global::call(index, "missing", &[], &heap),
        Err(NativeError::FunctionNotFound(_))
    ));
}

#[test]
fn test_lookup_unknown_index() {
    assert!(global::lookup_by_index(ExtensionIndex::new(u32::MAX)).is_none());
}
