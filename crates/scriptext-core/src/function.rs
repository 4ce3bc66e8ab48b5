//! Function descriptors and invocation.

use crate::error::NativeError;
use crate::marshal::{EngineValue, marshal_args};
use crate::runtime::{CallContext, HostHeap, NativeFn};
use crate::{FunctionArg, SymbolHash, ValueKind};

/// A native function exposed by an extension.
///
/// `params` lists the declared kind of each argument slot. The host
/// marshals actual arguments against it on every call; the descriptor itself
/// is never modified by a call.
#[derive(Debug, Clone)]
pub struct FunctionDescriptor {
    name: String,
    params: Vec<ValueKind>,
    implementation: NativeFn,
}

impl FunctionDescriptor {
    /// Create a descriptor from a name, parameter kinds and an implementation.
    ///
    /// ```
    /// use scriptext_core::{CallContext, FunctionDescriptor, ValueKind};
    ///
    /// let add = FunctionDescriptor::new(
    ///     "add",
    ///     [ValueKind::UInt32, ValueKind::UInt32],
    ///     |ctx: &mut CallContext<'_>| {
    ///         let _sum = ctx.arg::<u32>(0)?.wrapping_add(ctx.arg::<u32>(1)?);
    ///         Ok(())
    ///     },
    /// );
    /// assert_eq!(add.arg_count(), 2);
    /// ```
    pub fn new<F>(
        name: impl Into<String>,
        params: impl IntoIterator<Item = ValueKind>,
        implementation: F,
    ) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<(), NativeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            implementation: NativeFn::new(implementation),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter kinds, in order.
    #[inline]
    pub fn params(&self) -> &[ValueKind] {
        &self.params
    }

    #[inline]
    pub fn arg_count(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn implementation(&self) -> &NativeFn {
        &self.implementation
    }

    /// Identity of this function inside `extension`.
    pub fn hash(&self, extension: &str) -> SymbolHash {
        SymbolHash::from_function(extension, &self.name, &self.params)
    }

    /// Marshal engine values against the declared parameters and call the implementation.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke(&self, actual: &[EngineValue], heap: &dyn HostHeap) -> Result<(), NativeError> {
        let args = marshal_args(&self.name, &self.params, actual)?;
        self.invoke_marshalled(&args, heap)
    }

    /// Call the implementation with arguments that are already tagged.
    ///
    /// Count and kinds are checked against the declaration, and string and
    /// object handles must be live.
    pub fn invoke_marshalled(
        &self,
        args: &[FunctionArg],
        heap: &dyn HostHeap,
    ) -> Result<(), NativeError> {
        self.check_args(args, heap)?;
        tracing::debug!(function = %self.name, argc = args.len(), "invoking native function");
        let mut ctx = CallContext::new(self, args, heap);
        self.implementation.call(&mut ctx)
    }

    fn check_args(&self, args: &[FunctionArg], heap: &dyn HostHeap) -> Result<(), NativeError> {
        if args.len() != self.params.len() {
            return Err(NativeError::ArgumentCountMismatch {
                function: self.name.clone(),
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        for (index, (arg, expected)) in args.iter().zip(&self.params).enumerate() {
            if arg.kind() != *expected {
                return Err(NativeError::ArgumentKindMismatch {
                    function: self.name.clone(),
                    index,
                    expected: *expected,
                    actual: arg.kind(),
                });
            }
            let stale = match arg {
                FunctionArg::String(h) => heap.string_bytes(*h).is_none().then_some(h.index),
                FunctionArg::Object(h) => (!heap.is_live_object(*h)).then_some(h.index),
                _ => None,
            };
            if let Some(slot) = stale {
                return Err(NativeError::StaleHandle {
                    kind: arg.kind(),
                    index: slot,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::runtime::{ManagedHeap, ObjectHandle};

    fn recording(
        name: &str,
        params: Vec<ValueKind>,
    ) -> (FunctionDescriptor, Arc<Mutex<Vec<FunctionArg>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let function = FunctionDescriptor::new(name, params, move |ctx: &mut CallContext<'_>| {
            sink.lock().unwrap().extend_from_slice(ctx.args());
            Ok(())
        });
        (function, seen)
    }

    #[test]
    fn invoke_delivers_args_in_order() {
        let (add, seen) = recording("add", vec![ValueKind::UInt32, ValueKind::UInt32]);
        let heap = ManagedHeap::new();
        add.invoke(&[EngineValue::Number(2.0), EngineValue::Number(3.0)], &heap)
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![FunctionArg::UInt32(2), FunctionArg::UInt32(3)]
        );
    }

    #[test]
    fn invoke_is_repeatable() {
        let (f, seen) = recording("f", vec![ValueKind::Float64]);
        let heap = ManagedHeap::new();
        f.invoke(&[EngineValue::Number(1.0)], &heap).unwrap();
        f.invoke(&[EngineValue::Number(2.0)], &heap).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![FunctionArg::Float64(1.0), FunctionArg::Float64(2.0)]
        );
        assert_eq!(f.params(), &[ValueKind::Float64]);
    }

    #[test]
    fn invoke_wrong_count() {
        let (f, seen) = recording("f", vec![ValueKind::Boolean]);
        let heap = ManagedHeap::new();
        let err = f.invoke(&[], &heap).unwrap_err();
        assert!(matches!(err, NativeError::ArgumentCountMismatch { expected: 1, actual: 0, .. }));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn invoke_marshalled_kind_mismatch() {
        let (f, _) = recording("f", vec![ValueKind::UInt32]);
        let heap = ManagedHeap::new();
        let err = f
            .invoke_marshalled(&[FunctionArg::Float64(1.0)], &heap)
            .unwrap_err();
        assert_eq!(
            err,
            NativeError::ArgumentKindMismatch {
                function: "f".into(),
                index: 0,
                expected: ValueKind::UInt32,
                actual: ValueKind::Float64,
            }
        );
    }

    #[test]
    fn invoke_rejects_stale_object() {
        let (f, seen) = recording("f", vec![ValueKind::Object]);
        let heap = ManagedHeap::new();
        let err = f
            .invoke(&[EngineValue::Object(ObjectHandle::new(7, 0))], &heap)
            .unwrap_err();
        assert_eq!(
            err,
            NativeError::StaleHandle {
                kind: ValueKind::Object,
                index: 7,
            }
        );
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn implementation_error_propagates() {
        let f = FunctionDescriptor::new("fail", [], |_: &mut CallContext<'_>| {
            Err(NativeError::other("boom"))
        });
        let heap = ManagedHeap::new();
        assert_eq!(f.invoke(&[], &heap), Err(NativeError::other("boom")));
    }

    #[test]
    fn hash_depends_on_extension() {
        let (f, _) = recording("f", vec![]);
        assert_ne!(f.hash("a"), f.hash("b"));
        assert_eq!(f.hash("a"), SymbolHash::from_function("a", "f", &[]));
    }
}
