//! Registration index of an extension.

use std::fmt;

/// Identifies a registered extension.
///
/// Indices are handed out by the registry starting at 0, in registration
/// order, and never change afterwards.
///
/// # Example
///
/// ```
/// use scriptext_registry::ExtensionIndex;
///
/// let index = ExtensionIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert_eq!(index.to_string(), "ext#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionIndex(u32);

impl ExtensionIndex {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExtensionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ext#{}", self.0)
    }
}

impl From<u32> for ExtensionIndex {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<ExtensionIndex> for u32 {
    fn from(index: ExtensionIndex) -> Self {
        index.0
    }
}
