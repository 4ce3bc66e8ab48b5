//! Shared cells extensions write into.

use std::sync::Arc;

use parking_lot::Mutex;
use scriptext_core::{FieldValue, HostHeap, ObjectHandle, OwnedObject};

/// Holds the result of the most recent call into an extension.
///
/// Cloning shares the cell.
#[derive(Debug, Clone, Default)]
pub struct ResultSlot(Arc<Mutex<Option<FieldValue>>>);

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, replacing any previous one.
    pub fn set(&self, value: impl Into<FieldValue>) {
        *self.0.lock() = Some(value.into());
    }

    /// Remove and return the stored result.
    pub fn take(&self) -> Option<FieldValue> {
        self.0.lock().take()
    }

    /// Copy of the stored result.
    pub fn get(&self) -> Option<FieldValue> {
        self.0.lock().clone()
    }
}

/// Objects an extension keeps alive past the call that delivered them.
///
/// Cloning shares the store.
#[derive(Debug, Clone, Default)]
pub struct RetainedObjects(Arc<Mutex<Vec<OwnedObject>>>);

impl RetainedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, object: OwnedObject) {
        self.0.lock().push(object);
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Handles of every retained object, oldest first.
    pub fn handles(&self) -> Vec<ObjectHandle> {
        self.0.lock().iter().map(OwnedObject::handle).collect()
    }

    /// Release every retained object. Returns how many were released.
    pub fn release_all(&self, heap: &dyn HostHeap) -> usize {
        let objects = std::mem::take(&mut *self.0.lock());
        let count = objects.len();
        for object in objects {
            if object.release(heap).is_none() {
                tracing::warn!("retained object was already reclaimed by the host");
            }
        }
        count
    }
}
