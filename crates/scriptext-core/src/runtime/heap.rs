//! The host heap contract and a generational-arena implementation of it.

use std::any::Any;
use std::fmt;

use crate::error::StringBufferError;

use super::{Borrowed, BorrowedObject, BorrowedString, ManagedHandle, ObjectHandle, StringHandle};

/// What the extension layer needs from the host engine's heap.
///
/// Counts returned here are the count after the operation. `None` means the
/// handle is stale, or for `add_ref_*` that the count is already at
/// `u32::MAX` and was left unchanged.
pub trait HostHeap {
    /// UTF-8 contents of a live string.
    fn string_bytes(&self, handle: StringHandle) -> Option<&[u8]>;

    /// Whether an object handle refers to a live value.
    fn is_live_object(&self, handle: ObjectHandle) -> bool;

    fn add_ref_string(&self, handle: StringHandle) -> Option<u32>;
    fn release_string(&self, handle: StringHandle) -> Option<u32>;
    fn add_ref_object(&self, handle: ObjectHandle) -> Option<u32>;
    fn release_object(&self, handle: ObjectHandle) -> Option<u32>;

    fn string_ref_count(&self, handle: StringHandle) -> Option<u32>;
    fn object_ref_count(&self, handle: ObjectHandle) -> Option<u32>;
}

/// Reference count cell.
///
/// Plain `Cell<u32>` by default. Build with the `atomic-refcount` feature when
/// the host calls native functions from more than one thread.
#[cfg(not(feature = "atomic-refcount"))]
pub struct RefCount(std::cell::Cell<u32>);

#[cfg(not(feature = "atomic-refcount"))]
impl RefCount {
    pub fn new(count: u32) -> Self {
        Self(std::cell::Cell::new(count))
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Increment. Returns the new count, or `None` if it is already `u32::MAX`.
    #[inline]
    pub fn increment(&self) -> Option<u32> {
        let next = self.0.get().checked_add(1)?;
        self.0.set(next);
        Some(next)
    }

    /// Decrement. Returns the new count, or `None` if it was already zero.
    #[inline]
    pub fn decrement(&self) -> Option<u32> {
        let next = self.0.get().checked_sub(1)?;
        self.0.set(next);
        Some(next)
    }
}

#[cfg(feature = "atomic-refcount")]
pub struct RefCount(std::sync::atomic::AtomicU32);

#[cfg(feature = "atomic-refcount")]
impl RefCount {
    pub fn new(count: u32) -> Self {
        Self(std::sync::atomic::AtomicU32::new(count))
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0.load(std::sync::atomic::Ordering::Acquire)
    }

    /// Increment. Returns the new count, or `None` if it is already `u32::MAX`.
    #[inline]
    pub fn increment(&self) -> Option<u32> {
        use std::sync::atomic::Ordering;
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
            .ok()
            .map(|prev| prev + 1)
    }

    /// Decrement. Returns the new count, or `None` if it was already zero.
    #[inline]
    pub fn decrement(&self) -> Option<u32> {
        use std::sync::atomic::Ordering;
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()
            .map(|prev| prev - 1)
    }
}

impl fmt::Debug for RefCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefCount({})", self.get())
    }
}

struct HeapSlot<T> {
    generation: u32,
    value: Option<T>,
    ref_count: RefCount,
}

/// Generational slot storage shared by the string and object halves of the heap.
struct Slots<T> {
    slots: Vec<HeapSlot<T>>,
    free_list: Vec<u32>,
}

impl<T> Slots<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    fn allocate(&mut self, value: T) -> (u32, u32) {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            slot.ref_count = RefCount::new(1);
            (index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                value: Some(value),
                ref_count: RefCount::new(1),
            });
            (index, 0)
        }
    }

    fn live(&self, index: u32, generation: u32) -> Option<&HeapSlot<T>> {
        let slot = self.slots.get(index as usize)?;
        (slot.generation == generation && slot.value.is_some()).then_some(slot)
    }

    fn live_mut(&mut self, index: u32, generation: u32) -> Option<&mut HeapSlot<T>> {
        let slot = self.slots.get_mut(index as usize)?;
        (slot.generation == generation && slot.value.is_some()).then_some(slot)
    }

    /// Reclaim every live slot whose count reached zero.
    fn collect(&mut self) -> usize {
        let mut reclaimed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_some() && slot.ref_count.get() == 0 {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index as u32);
                reclaimed += 1;
            }
        }
        reclaimed
    }

    fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

/// Heap storage for managed strings and objects with generational indices.
///
/// A new value starts with a count of 1, the host's own reference. Releasing
/// to zero leaves the value readable until [`ManagedHeap::collect`] reclaims
/// it; after that every old handle is stale.
pub struct ManagedHeap {
    strings: Slots<Box<str>>,
    objects: Slots<Box<dyn Any + Send + Sync>>,
}

impl ManagedHeap {
    /// Create a new empty heap.
    pub fn new() -> Self {
        Self {
            strings: Slots::new(),
            objects: Slots::new(),
        }
    }

    /// Allocate a string.
    pub fn alloc_string(&mut self, value: impl Into<Box<str>>) -> StringHandle {
        let (index, generation) = self.strings.allocate(value.into());
        StringHandle::new(index, generation)
    }

    /// Allocate an object.
    pub fn alloc_object<T: Any + Send + Sync>(&mut self, value: T) -> ObjectHandle {
        let (index, generation) = self.objects.allocate(Box::new(value));
        ObjectHandle::new(index, generation)
    }

    /// Read a live string.
    pub fn string(&self, handle: StringHandle) -> Option<&str> {
        self.strings
            .live(handle.index, handle.generation)?
            .value
            .as_deref()
    }

    /// Read a live object as `T`. `None` if stale or of another type.
    pub fn object<T: Any>(&self, handle: ObjectHandle) -> Option<&T> {
        self.objects
            .live(handle.index, handle.generation)?
            .value
            .as_ref()?
            .downcast_ref::<T>()
    }

    /// Mutable access to a live object as `T`.
    pub fn object_mut<T: Any>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.objects
            .live_mut(handle.index, handle.generation)?
            .value
            .as_mut()?
            .downcast_mut::<T>()
    }

    /// Borrow a string handle for as long as the heap is borrowed.
    pub fn borrow_string(&self, handle: StringHandle) -> Option<BorrowedString<'_>> {
        self.borrow(handle)
    }

    /// Borrow an object handle for as long as the heap is borrowed.
    pub fn borrow_object(&self, handle: ObjectHandle) -> Option<BorrowedObject<'_>> {
        self.borrow(handle)
    }

    fn borrow<H: ManagedHandle>(&self, handle: H) -> Option<Borrowed<'_, H>> {
        Borrowed::from_host(self, handle)
    }

    /// Reclaim every value whose count is zero. Returns how many were freed.
    pub fn collect(&mut self) -> usize {
        let reclaimed = self.strings.collect() + self.objects.collect();
        if reclaimed > 0 {
            tracing::debug!(reclaimed, "managed heap collected");
        }
        reclaimed
    }

    /// Number of live strings.
    pub fn string_count(&self) -> usize {
        self.strings.live_count()
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.live_count()
    }
}

impl Default for ManagedHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManagedHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedHeap")
            .field("strings", &self.strings.live_count())
            .field("objects", &self.objects.live_count())
            .finish()
    }
}

impl HostHeap for ManagedHeap {
    fn string_bytes(&self, handle: StringHandle) -> Option<&[u8]> {
        self.string(handle).map(str::as_bytes)
    }

    fn is_live_object(&self, handle: ObjectHandle) -> bool {
        self.objects.live(handle.index, handle.generation).is_some()
    }

    fn add_ref_string(&self, handle: StringHandle) -> Option<u32> {
        let slot = self.strings.live(handle.index, handle.generation)?;
        slot.ref_count.increment()
    }

    fn release_string(&self, handle: StringHandle) -> Option<u32> {
        self.strings
            .live(handle.index, handle.generation)?
            .ref_count
            .decrement()
    }

    fn add_ref_object(&self, handle: ObjectHandle) -> Option<u32> {
        let slot = self.objects.live(handle.index, handle.generation)?;
        slot.ref_count.increment()
    }

    fn release_object(&self, handle: ObjectHandle) -> Option<u32> {
        self.objects
            .live(handle.index, handle.generation)?
            .ref_count
            .decrement()
    }

    fn string_ref_count(&self, handle: StringHandle) -> Option<u32> {
        Some(
            self.strings
                .live(handle.index, handle.generation)?
                .ref_count
                .get(),
        )
    }

    fn object_ref_count(&self, handle: ObjectHandle) -> Option<u32> {
        Some(
            self.objects
                .live(handle.index, handle.generation)?
                .ref_count
                .get(),
        )
    }
}

/// Byte length a buffer needs to hold `string`.
pub fn string_len(
    heap: &dyn HostHeap,
    string: &BorrowedString<'_>,
) -> Result<usize, StringBufferError> {
    let handle = string.handle();
    heap.string_bytes(handle)
        .map(<[u8]>::len)
        .ok_or(StringBufferError::StaleHandle {
            index: handle.index,
        })
}

/// Copy a managed string's UTF-8 bytes into `buffer`.
///
/// Returns the number of bytes written. If `buffer` is too small nothing is
/// written and the error carries the required size, so passing an empty
/// buffer is a cheap size query.
pub fn string_to_buffer(
    heap: &dyn HostHeap,
    string: &BorrowedString<'_>,
    buffer: &mut [u8],
) -> Result<usize, StringBufferError> {
    let handle = string.handle();
    let bytes = heap
        .string_bytes(handle)
        .ok_or(StringBufferError::StaleHandle {
            index: handle.index,
        })?;
    if bytes.len() > buffer.len() {
        return Err(StringBufferError::InsufficientCapacity {
            required: bytes.len(),
            capacity: buffer.len(),
        });
    }
    buffer[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}
