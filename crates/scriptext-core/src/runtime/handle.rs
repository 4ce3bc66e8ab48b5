//! Handles to host-managed strings and objects, and the ownership types around them.
//!
//! The host engine owns every managed value. Native code sees two kinds of
//! handle wrappers:
//!
//! - [`Borrowed`]: valid for one scope (typically a single native call). It
//!   has no release capability and cannot outlive the borrow it came from.
//! - [`Owned`]: one counted reference. Only [`acquire`] creates one and only a
//!   consuming [`Owned::release`] ends it, so a double release does not compile.

use std::fmt;
use std::marker::PhantomData;

use crate::error::NativeError;
use crate::ValueKind;

use super::HostHeap;

/// Handle to a host-managed string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StringHandle {
    /// Slot index in the host heap
    pub index: u32,
    /// Generation for use-after-free detection
    pub generation: u32,
}

/// Handle to a host-managed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Slot index in the host heap
    pub index: u32,
    /// Generation for use-after-free detection
    pub generation: u32,
}

impl StringHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl ObjectHandle {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::StringHandle {}
    impl Sealed for super::ObjectHandle {}
}

/// A raw handle to one of the two reference-counted kinds.
///
/// Sealed: only [`StringHandle`] and [`ObjectHandle`] implement it.
pub trait ManagedHandle: Copy + Eq + fmt::Debug + private::Sealed {
    /// The value kind this handle carries.
    const KIND: ValueKind;

    /// Slot index, for diagnostics.
    fn index(self) -> u32;

    /// Whether the host still holds a value for this handle.
    fn is_live(self, heap: &dyn HostHeap) -> bool;

    /// Increment the count. Returns the new count, or `None` for a stale
    /// handle or a count that cannot grow.
    fn add_ref(self, heap: &dyn HostHeap) -> Option<u32>;

    /// Decrement the count. Returns the remaining count, or `None` for a stale handle.
    fn release(self, heap: &dyn HostHeap) -> Option<u32>;
}

impl ManagedHandle for StringHandle {
    const KIND: ValueKind = ValueKind::String;

    fn index(self) -> u32 {
        self.index
    }

    fn is_live(self, heap: &dyn HostHeap) -> bool {
        heap.string_bytes(self).is_some()
    }

    fn add_ref(self, heap: &dyn HostHeap) -> Option<u32> {
        heap.add_ref_string(self)
    }

    fn release(self, heap: &dyn HostHeap) -> Option<u32> {
        heap.release_string(self)
    }
}

impl ManagedHandle for ObjectHandle {
    const KIND: ValueKind = ValueKind::Object;

    fn index(self) -> u32 {
        self.index
    }

    fn is_live(self, heap: &dyn HostHeap) -> bool {
        heap.is_live_object(self)
    }

    fn add_ref(self, heap: &dyn HostHeap) -> Option<u32> {
        heap.add_ref_object(self)
    }

    fn release(self, heap: &dyn HostHeap) -> Option<u32> {
        heap.release_object(self)
    }
}

/// A handle valid only for the lifetime `'scope`.
///
/// Native functions receive their string and object arguments this way. To
/// keep the value past the call, [`acquire`] it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Borrowed<'scope, H: ManagedHandle> {
    handle: H,
    _scope: PhantomData<&'scope ()>,
}

/// Call-scoped string handle.
pub type BorrowedString<'scope> = Borrowed<'scope, StringHandle>;
/// Call-scoped object handle.
pub type BorrowedObject<'scope> = Borrowed<'scope, ObjectHandle>;

impl<'scope, H: ManagedHandle> Borrowed<'scope, H> {
    /// Borrow a handle for as long as `heap` is borrowed.
    ///
    /// Returns `None` if the handle is stale.
    pub fn from_host(heap: &'scope dyn HostHeap, handle: H) -> Option<Self> {
        handle.is_live(heap).then(|| Self::new(handle))
    }

    /// Liveness is the caller's responsibility.
    pub(crate) fn new(handle: H) -> Self {
        Self {
            handle,
            _scope: PhantomData,
        }
    }

    /// The underlying raw handle.
    #[inline]
    pub fn handle(&self) -> H {
        self.handle
    }
}

impl<H: ManagedHandle> fmt::Debug for Borrowed<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Borrowed").field(&self.handle).finish()
    }
}

/// One counted reference to a managed value.
///
/// Not `Clone`: a second reference is a second [`acquire`] (see
/// [`Owned::try_clone`]). Dropping an `Owned` without releasing it leaks the
/// reference and logs a warning.
#[must_use = "an owned handle must be released"]
pub struct Owned<H: ManagedHandle> {
    handle: H,
    live: bool,
}

/// Counted string reference.
pub type OwnedString = Owned<StringHandle>;
/// Counted object reference.
pub type OwnedObject = Owned<ObjectHandle>;

impl<H: ManagedHandle> Owned<H> {
    /// The underlying raw handle.
    #[inline]
    pub fn handle(&self) -> H {
        self.handle
    }

    /// Borrow for as long as this owner lives.
    pub fn borrow(&self) -> Borrowed<'_, H> {
        Borrowed::new(self.handle)
    }

    /// Take another counted reference to the same value.
    pub fn try_clone(&self, heap: &dyn HostHeap) -> Result<Self, NativeError> {
        acquire(heap, &self.borrow())
    }

    /// Give the reference back to the host.
    ///
    /// Returns the remaining count (`Some(0)` means the host may reclaim the
    /// value), or `None` if the host no longer knew the handle.
    pub fn release(mut self, heap: &dyn HostHeap) -> Option<u32> {
        self.live = false;
        self.handle.release(heap)
    }
}

impl<H: ManagedHandle> fmt::Debug for Owned<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owned").field(&self.handle).finish()
    }
}

impl<H: ManagedHandle> Drop for Owned<H> {
    fn drop(&mut self) {
        if self.live {
            tracing::warn!(
                kind = %H::KIND,
                index = self.handle.index(),
                "owned handle dropped without release; reference leaked"
            );
        }
    }
}

/// Increment the count of a borrowed value and return an owning handle.
pub fn acquire<H: ManagedHandle>(
    heap: &dyn HostHeap,
    borrowed: &Borrowed<'_, H>,
) -> Result<Owned<H>, NativeError> {
    let handle = borrowed.handle();
    match handle.add_ref(heap) {
        Some(count) => {
            tracing::trace!(kind = %H::KIND, index = handle.index(), count, "acquired");
            Ok(Owned { handle, live: true })
        }
        None if handle.is_live(heap) => Err(NativeError::RefCountOverflow {
            kind: H::KIND,
            index: handle.index(),
        }),
        None => Err(NativeError::StaleHandle {
            kind: H::KIND,
            index: handle.index(),
        }),
    }
}

/// Keep a borrowed string alive past the current call.
pub fn acquire_string(
    heap: &dyn HostHeap,
    string: &BorrowedString<'_>,
) -> Result<OwnedString, NativeError> {
    acquire(heap, string)
}

/// Keep a borrowed object alive past the current call.
pub fn acquire_object(
    heap: &dyn HostHeap,
    object: &BorrowedObject<'_>,
) -> Result<OwnedObject, NativeError> {
    acquire(heap, object)
}

/// Release a string previously acquired. Returns the remaining count.
pub fn release_string(heap: &dyn HostHeap, string: OwnedString) -> Option<u32> {
    string.release(heap)
}

/// Release an object previously acquired. Returns the remaining count.
pub fn release_object(heap: &dyn HostHeap, object: OwnedObject) -> Option<u32> {
    object.release(heap)
}
