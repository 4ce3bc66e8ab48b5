//! Storage for extension function implementations.

use std::fmt;
use std::sync::Arc;

use crate::error::NativeError;

use super::CallContext;

/// Shared, type-erased implementation of an extension function.
///
/// Cloning shares the implementation, so a [`FunctionDescriptor`](crate::FunctionDescriptor)
/// can be cloned into the registry and handed to several hosts.
#[derive(Clone)]
pub struct NativeFn {
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    pub fn new(implementation: impl NativeCallable + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(implementation),
        }
    }

    /// Run the implementation against one call's context.
    #[inline]
    pub fn call(&self, ctx: &mut CallContext<'_>) -> Result<(), NativeError> {
        self.inner.invoke(ctx)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({:p})", Arc::as_ptr(&self.inner))
    }
}

/// Something the host can run as an extension function.
///
/// Implemented for every `Fn(&mut CallContext) -> Result<(), NativeError>`.
/// The implementation reads its arguments from the context; results go
/// wherever the extension keeps them, since boundary functions return nothing.
pub trait NativeCallable {
    fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<(), NativeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&mut CallContext<'_>) -> Result<(), NativeError>,
{
    fn invoke(&self, ctx: &mut CallContext<'_>) -> Result<(), NativeError> {
        self(ctx)
    }
}
