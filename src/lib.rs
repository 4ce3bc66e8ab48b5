//! Native extension registration and typed value marshalling for embedded
//! script engines.
//!
//! A native module describes what it exposes with an [`ExtensionDescriptor`]
//! (named fields and functions) and registers it; the registry assigns a
//! stable [`ExtensionIndex`]. When script code calls a registered function
//! the host marshals its own values into tagged [`FunctionArg`]s against the
//! declared [`ValueKind`]s and runs the implementation with a
//! [`CallContext`].
//!
//! # Crates
//!
//! - `scriptext-core` - value kinds, descriptors, marshalling, managed handles
//! - `scriptext-registry` - [`ExtensionRegistry`] and the process-wide [`global`] registry
//! - `scriptext-modules` - ready-made [`math`] and [`text`] extensions
//!
//! # Example
//!
//! ```
//! use scriptext::prelude::*;
//!
//! let mut registry = ExtensionRegistry::new();
//! let index = registry
//!     .register(
//!         ExtensionDescriptor::new("math")
//!             .with_field(FieldDescriptor::new("PI", 3.14159f64))
//!             .with_function(FunctionDescriptor::new(
//!                 "add",
//!                 [ValueKind::UInt32, ValueKind::UInt32],
//!                 |ctx: &mut CallContext<'_>| {
//!                     let sum = ctx.arg::<u32>(0)?.wrapping_add(ctx.arg::<u32>(1)?);
//!                     assert_eq!(sum, 5);
//!                     Ok(())
//!                 },
//!             )),
//!     )
//!     .unwrap();
//!
//! let heap = ManagedHeap::new();
//! registry
//!     .call(index, "add", &[EngineValue::Number(2.0), EngineValue::Number(3.0)], &heap)
//!     .unwrap();
//! ```

pub mod logging;

pub use scriptext_core::*;
pub use scriptext_modules::{ResultSlot, RetainedObjects, math, text};
pub use scriptext_registry::{
    DuplicatePolicy, ExtensionIndex, ExtensionRegistry, RegisteredExtension, RegistryConfig,
    global,
};

pub use logging::{LogConfig, LogFormat, LoggingError, init_logging};

/// Commonly used types.
pub mod prelude {
    pub use scriptext_core::{
        BorrowedObject, BorrowedString, CallContext, EngineValue, ExtensionDescriptor,
        FieldDescriptor, FieldValue, FunctionArg, FunctionDescriptor, HostHeap, ManagedHeap,
        NativeError, OwnedObject, OwnedString, RegistrationError, SymbolHash, ValueKind,
    };
    pub use scriptext_registry::{ExtensionIndex, ExtensionRegistry, RegistryConfig};
}
