//! Text extension: string inspection and object retention.
//!
//! Registered under the name `text`. String arguments arrive borrowed and are
//! materialized through the size-then-copy buffer protocol.

use scriptext_core::{
    CallContext, ExtensionDescriptor, FieldDescriptor, FunctionDescriptor, NativeError, ValueKind,
};

use crate::{ResultSlot, RetainedObjects};

pub const NAME: &str = "text";

/// Build the `text` extension.
///
/// `retain(object)` stores an owned reference in `retained`; the embedder
/// gives them back with [`RetainedObjects::release_all`].
pub fn extension(results: &ResultSlot, retained: &RetainedObjects) -> ExtensionDescriptor {
    let length_out = results.clone();
    let upper_out = results.clone();
    let store = retained.clone();

    ExtensionDescriptor::new(NAME)
        .with_field(FieldDescriptor::new("SEPARATOR", " "))
        .with_function(FunctionDescriptor::new(
            "length",
            [ValueKind::String],
            move |ctx: &mut CallContext<'_>| {
                let s = ctx.string_arg(0)?;
                let len = match ctx.string_to_buffer(&s, &mut []) {
                    Ok(written) => written,
                    Err(err) => err.required().ok_or(NativeError::StringBuffer(err))?,
                };
                let len = u32::try_from(len).map_err(|_| {
                    NativeError::other(format!("string of {len} bytes exceeds uint"))
                })?;
                length_out.set(len);
                Ok(())
            },
        ))
        .with_function(FunctionDescriptor::new(
            "upper",
            [ValueKind::String],
            move |ctx: &mut CallContext<'_>| {
                let s = ctx.string_arg(0)?;
                upper_out.set(ctx.read_string(&s)?.to_uppercase());
                Ok(())
            },
        ))
        .with_function(FunctionDescriptor::new(
            "retain",
            [ValueKind::Object],
            move |ctx: &mut CallContext<'_>| {
                let object = ctx.object_arg(0)?;
                let owned = ctx.acquire_object(&object)?;
                tracing::debug!(handle = ?owned.handle(), "object retained");
                store.push(owned);
                Ok(())
            },
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptext_core::{EngineValue, FieldValue, HostHeap, ManagedHeap, ObjectHandle};

    #[test]
    fn separator_field() {
        let ext = extension(&ResultSlot::new(), &RetainedObjects::new());
        assert!(ext.validate().is_ok());
        assert_eq!(ext.field("SEPARATOR").unwrap().value.as_str(), Some(" "));
    }

    #[test]
    fn length_counts_utf8_bytes() {
        let results = ResultSlot::new();
        let ext = extension(&results, &RetainedObjects::new());
        let mut heap = ManagedHeap::new();
        let s = heap.alloc_string("héllo");

        ext.function("length")
            .unwrap()
            .invoke(&[EngineValue::String(s)], &heap)
            .unwrap();
        assert_eq!(results.take(), Some(FieldValue::UInt32(6)));
    }

    #[test]
    fn length_of_empty_string() {
        let results = ResultSlot::new();
        let ext = extension(&results, &RetainedObjects::new());
        let mut heap = ManagedHeap::new();
        let s = heap.alloc_string("");

        ext.function("length")
            .unwrap()
            .invoke(&[EngineValue::String(s)], &heap)
            .unwrap();
        assert_eq!(results.take(), Some(FieldValue::UInt32(0)));
    }

    #[test]
    fn upper_materializes() {
        let results = ResultSlot::new();
        let ext = extension(&results, &RetainedObjects::new());
        let mut heap = ManagedHeap::new();
        let s = heap.alloc_string("abc");

        ext.function("upper")
            .unwrap()
            .invoke(&[EngineValue::String(s)], &heap)
            .unwrap();
        assert_eq!(results.take(), Some(FieldValue::String("ABC".into())));
    }

    #[test]
    fn retain_keeps_object_alive() {
        let retained = RetainedObjects::new();
        let ext = extension(&ResultSlot::new(), &retained);
        let mut heap = ManagedHeap::new();
        let obj = heap.alloc_object(7u64);

        ext.function("retain")
            .unwrap()
            .invoke(&[EngineValue::Object(obj)], &heap)
            .unwrap();
        assert_eq!(retained.handles(), vec![obj]);
        assert_eq!(heap.object_ref_count(obj), Some(2));

        // Host drops its own reference; the retained one keeps the value.
        assert_eq!(heap.release_object(obj), Some(1));
        assert_eq!(heap.collect(), 0);
        assert_eq!(heap.object::<u64>(obj), Some(&7));

        assert_eq!(retained.release_all(&heap), 1);
        assert!(retained.is_empty());
        assert_eq!(heap.collect(), 1);
        assert!(heap.object::<u64>(obj).is_none());
    }

    #[test]
    fn retain_rejects_stale_object() {
        let retained = RetainedObjects::new();
        let ext = extension(&ResultSlot::new(), &retained);
        let heap = ManagedHeap::new();

        let err = ext
            .function("retain")
            .unwrap()
            .invoke(&[EngineValue::Object(ObjectHandle::new(0, 0))], &heap)
            .unwrap_err();
        assert!(matches!(err, NativeError::StaleHandle { .. }));
        assert!(retained.is_empty());
    }

    #[test]
    fn string_function_rejects_number() {
        let ext = extension(&ResultSlot::new(), &RetainedObjects::new());
        let heap = ManagedHeap::new();
        let err = ext
            .function("upper")
            .unwrap()
            .invoke(&[EngineValue::Number(1.0)], &heap)
            .unwrap_err();
        assert!(matches!(err, NativeError::Argument { index: 0, .. }));
    }
}
