//! Integration tests for registering extensions and calling into them.
//!
//! These drive the facade the way an embedder would: build descriptors,
//! register them, marshal engine values and read what the native side saw.

use std::sync::{Arc, Mutex};

use scriptext::prelude::*;
use scriptext::{ResultSlot, RetainedObjects, math, text};

/// An `add(uint, uint)` function that records the arguments it receives.
fn recording_add(seen: Arc<Mutex<Vec<FunctionArg>>>) -> FunctionDescriptor {
    FunctionDescriptor::new(
        "add",
        [ValueKind::UInt32, ValueKind::UInt32],
        move |ctx: &mut CallContext<'_>| {
            seen.lock().unwrap().extend_from_slice(ctx.args());
            Ok(())
        },
    )
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_math_extension_end_to_end() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut registry = ExtensionRegistry::new();
    let index = registry
        .register(
            ExtensionDescriptor::new("math")
                .with_field(FieldDescriptor::new("PI", 3.14159f64))
                .with_function(recording_add(Arc::clone(&seen))),
        )
        .unwrap();

    let ext = registry.get(index).unwrap();
    let pi = ext.descriptor().field("PI").unwrap();
    assert_eq!(pi.kind(), ValueKind::Float64);
    assert_eq!(pi.value, FieldValue::Float64(3.14159));

    let heap = ManagedHeap::new();
    registry
        .call(index, "add", &[EngineValue::Number(2.0), EngineValue::Number(3.0)], &heap)
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![FunctionArg::UInt32(2), FunctionArg::UInt32(3)]
    );
}

#[test]
fn test_descriptor_unchanged_by_calls() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut registry = ExtensionRegistry::new();
    let index = registry
        .register(ExtensionDescriptor::new("math").with_function(recording_add(Arc::clone(&seen))))
        .unwrap();
    let heap = ManagedHeap::new();

    for (a, b) in [(1.0, 2.0), (3.0, 4.0)] {
        registry
            .call(index, "add", &[EngineValue::Number(a), EngineValue::Number(b)], &heap)
            .unwrap();
    }

    let add = registry.get(index).unwrap().function("add").unwrap();
    assert_eq!(add.params(), &[ValueKind::UInt32, ValueKind::UInt32]);
    assert_eq!(seen.lock().unwrap().len(), 4);
}

#[test]
fn test_uint_coercion_reaches_implementation() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let add = recording_add(Arc::clone(&seen));
    let heap = ManagedHeap::new();

    add.invoke(
        &[EngineValue::Number(4294967296.5), EngineValue::Number(-1.9)],
        &heap,
    )
    .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![FunctionArg::UInt32(0), FunctionArg::UInt32(4294967295)]
    );
}

#[test]
fn test_hash_dispatch_matches_index_dispatch() {
    let results = ResultSlot::new();
    let mut registry = ExtensionRegistry::new();
    registry.register(math::extension(&results)).unwrap();
    let heap = ManagedHeap::new();

    let hash = SymbolHash::from_function(
        math::NAME,
        "clamp",
        &[ValueKind::Float64, ValueKind::Float64, ValueKind::Float64],
    );
    registry
        .call_by_hash(
            hash,
            &[
                EngineValue::Number(7.0),
                EngineValue::Number(0.0),
                EngineValue::Number(1.0),
            ],
            &heap,
        )
        .unwrap();
    assert_eq!(results.take(), Some(FieldValue::Float64(1.0)));
}

// =============================================================================
// Registration rules
// =============================================================================

#[test]
fn test_registration_order_and_iteration() {
    let mut registry = ExtensionRegistry::new();
    let names = ["d0", "d1", "d2", "d3"];
    for name in names {
        registry.register(ExtensionDescriptor::new(name)).unwrap();
    }

    for (i, ext) in registry.iter().enumerate() {
        assert_eq!(ext.index(), ExtensionIndex::new(i as u32));
        assert_eq!(ext.name(), names[i]);
    }
    let recent: Vec<_> = registry.iter_recent_first().map(|e| e.name()).collect();
    assert_eq!(recent, ["d3", "d2", "d1", "d0"]);
}

#[test]
fn test_strict_registry_rejects_duplicates() {
    let mut registry = ExtensionRegistry::with_config(RegistryConfig::strict());
    registry.register(ExtensionDescriptor::new("math")).unwrap();
    let err = registry.register(ExtensionDescriptor::new("math")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "duplicate extension: 'math' already registered at index 0"
    );
}

#[test]
fn test_malformed_extension_rejected() {
    let mut registry = ExtensionRegistry::new();
    let bad = ExtensionDescriptor::new("bad")
        .with_field(FieldDescriptor::new("dup", true))
        .with_function(FunctionDescriptor::new("dup", [], |_: &mut CallContext<'_>| Ok(())));
    assert!(matches!(
        registry.register(bad),
        Err(RegistrationError::NameConflict { .. })
    ));
    assert!(registry.is_empty());
}

// =============================================================================
// Managed values
// =============================================================================

#[test]
fn test_text_extension_with_managed_strings() {
    let results = ResultSlot::new();
    let retained = RetainedObjects::new();
    let mut registry = ExtensionRegistry::new();
    let index = registry.register(text::extension(&results, &retained)).unwrap();

    let mut heap = ManagedHeap::new();
    let s = heap.alloc_string("script");

    registry
        .call(index, "upper", &[EngineValue::String(s)], &heap)
        .unwrap();
    assert_eq!(results.take(), Some(FieldValue::String("SCRIPT".into())));

    registry
        .call(index, "length", &[EngineValue::String(s)], &heap)
        .unwrap();
    assert_eq!(results.take(), Some(FieldValue::UInt32(6)));

    // Borrowed arguments are not retained.
    assert_eq!(heap.string_ref_count(s), Some(1));
}

#[test]
fn test_retained_object_survives_host_release() {
    let retained = RetainedObjects::new();
    let mut registry = ExtensionRegistry::new();
    let index = registry
        .register(text::extension(&ResultSlot::new(), &retained))
        .unwrap();

    let mut heap = ManagedHeap::new();
    let obj = heap.alloc_object(String::from("payload"));
    registry
        .call(index, "retain", &[EngineValue::Object(obj)], &heap)
        .unwrap();

    heap.release_object(obj);
    heap.collect();
    assert_eq!(heap.object::<String>(obj).map(String::as_str), Some("payload"));

    retained.release_all(&heap);
    heap.collect();
    assert!(heap.object::<String>(obj).is_none());
}

#[test]
fn test_stale_string_argument_rejected() {
    let results = ResultSlot::new();
    let ext = text::extension(&results, &RetainedObjects::new());

    let mut heap = ManagedHeap::new();
    let s = heap.alloc_string("gone");
    heap.release_string(s);
    heap.collect();

    let err = ext
        .function("upper")
        .unwrap()
        .invoke(&[EngineValue::String(s)], &heap)
        .unwrap_err();
    assert!(matches!(err, NativeError::StaleHandle { kind: ValueKind::String, .. }));
    assert_eq!(results.take(), None);
}
