//! The process-wide extension registry.
//!
//! Native modules register themselves here at startup with [`extend_with`];
//! the host resolves them later by index or name. All access goes through
//! one mutex, so registration and lookup are safe from any thread.
//!
//! Functions are invoked outside the lock: [`call`] clones the extension's
//! `Arc` and releases the mutex before running native code, so an
//! implementation may itself use this module.

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use scriptext_core::{EngineValue, ExtensionDescriptor, HostHeap, NativeError, RegistrationError};

use crate::{ExtensionIndex, ExtensionRegistry, RegisteredExtension, RegistryConfig};

lazy_static! {
    static ref REGISTRY: Mutex<ExtensionRegistry> = Mutex::new(ExtensionRegistry::new());
}

/// Register an extension with the process-wide registry.
pub fn extend_with(descriptor: ExtensionDescriptor) -> Result<ExtensionIndex, RegistrationError> {
    REGISTRY.lock().register(descriptor)
}

/// Look up a registered extension by index.
pub fn lookup_by_index(index: ExtensionIndex) -> Option<Arc<RegisteredExtension>> {
    REGISTRY.lock().get(index).cloned()
}

/// The most recent extension registered under `name`.
pub fn find_extension(name: &str) -> Option<Arc<RegisteredExtension>> {
    REGISTRY.lock().find(name).cloned()
}

pub fn registered_count() -> usize {
    REGISTRY.lock().len()
}

/// Set the registry configuration. Fails once anything has been registered.
pub fn configure(config: RegistryConfig) -> Result<(), RegistrationError> {
    REGISTRY.lock().set_config(config)
}

/// Run `f` with the registry locked.
///
/// Do not call back into this module from `f`; the mutex is not reentrant.
pub fn with_registry<R>(f: impl FnOnce(&ExtensionRegistry) -> R) -> R {
    f(&REGISTRY.lock())
}

/// Invoke a function of a registered extension.
pub fn call(
    index: ExtensionIndex,
    function: &str,
    actual: &[EngineValue],
    heap: &dyn HostHeap,
) -> Result<(), NativeError> {
    let extension = lookup_by_index(index).ok_or(NativeError::ExtensionNotFound {
        index: index.get(),
    })?;
    let descriptor = extension.function(function).ok_or_else(|| {
        NativeError::FunctionNotFound(format!("{}.{}", extension.name(), function))
    })?;
    descriptor.invoke(actual, heap)
}
