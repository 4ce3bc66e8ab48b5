//! Managed handles, the host heap contract and native call plumbing.
//!
//! ## Key Types
//!
//! - [`StringHandle`] / [`ObjectHandle`]: raw identities of host-managed values
//! - [`Borrowed`] / [`Owned`]: call-scoped vs counted ownership of a handle
//! - [`HostHeap`]: what the host engine provides (bytes, liveness, counts)
//! - [`ManagedHeap`]: generational arena implementing [`HostHeap`]
//! - [`NativeFn`]: type-erased callable wrapper for extension functions
//! - [`CallContext`]: bridge between the host and Rust for one call

mod call_context;
mod handle;
mod heap;
mod native_fn;

pub use call_context::CallContext;
pub use handle::{
    Borrowed, BorrowedObject, BorrowedString, ManagedHandle, ObjectHandle, Owned, OwnedObject,
    OwnedString, StringHandle, acquire, acquire_object, acquire_string, release_object,
    release_string,
};
pub use heap::{HostHeap, ManagedHeap, RefCount, string_len, string_to_buffer};
pub use native_fn::{NativeCallable, NativeFn};
