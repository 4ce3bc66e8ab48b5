//! Core types for native script extensions.
//!
//! This crate provides what a native module and a host engine share:
//!
//! - **value_kind** - the closed set of value kinds crossing the boundary
//! - **field** / **arg** - typed constants and typed call arguments
//! - **marshal** - conversion of engine values into typed arguments
//! - **function** / **extension** - descriptors a module hands to the registry
//! - **runtime** - managed handles, the host heap contract and call contexts
//!
//! Registration and lookup live in `scriptext-registry`.

mod arg;
pub mod coerce;
pub mod error;
mod extension;
mod field;
mod function;
mod hash;
pub mod marshal;
pub mod runtime;
mod value_kind;

pub use arg::{FromArg, FunctionArg};
pub use error::{
    ConversionError, NativeError, RegistrationError, StringBufferError, ValueKindError,
};
pub use extension::ExtensionDescriptor;
pub use field::{FieldDescriptor, FieldValue};
pub use function::FunctionDescriptor;
pub use hash::SymbolHash;
pub use marshal::{EngineValue, marshal_arg, marshal_args};
pub use runtime::{
    Borrowed, BorrowedObject, BorrowedString, CallContext, HostHeap, ManagedHandle, ManagedHeap,
    NativeCallable, NativeFn, ObjectHandle, Owned, OwnedObject, OwnedString, RefCount,
    StringHandle, acquire, acquire_object, acquire_string, release_object, release_string,
    string_len, string_to_buffer,
};
pub use value_kind::ValueKind;
