//! Error types for the extension boundary.
//!
//! ## Error Hierarchy
//!
//! ```text
//! RegistrationError  - descriptor validation and registry bookkeeping
//! NativeError        - failures while invoking a native function
//! ├── ConversionError  - engine value could not become the declared kind
//! StringBufferError  - string materialization into a caller buffer
//! ValueKindError     - unknown kind tag at the boundary
//! ```
//!
//! None of these are fatal. Capacity errors are expected and recoverable;
//! the rest report a caller contract violation.

use thiserror::Error;

use crate::ValueKind;

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors raised while turning a value into a declared kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value's kind is not convertible to the requested kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Managed string bytes were not valid UTF-8.
    #[error("invalid UTF-8 string data")]
    InvalidUtf8,
}

// ============================================================================
// Native Errors
// ============================================================================

/// Errors that can occur during native function execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// Error converting an argument.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Conversion of a specific positional argument failed.
    #[error("argument {index} of '{function}': {source}")]
    Argument {
        function: String,
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// Argument index out of bounds.
    #[error("argument index {index} out of bounds (function has {count} arguments)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    /// Caller supplied a different number of actual arguments than declared.
    #[error("'{function}' expects {expected} arguments, got {actual}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A pre-marshalled argument has a different kind than the declared parameter.
    #[error("argument {index} of '{function}': declared {expected}, got {actual}")]
    ArgumentKindMismatch {
        function: String,
        index: usize,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Stale managed handle (value was reclaimed by the host).
    #[error("stale {kind} handle: slot {index} has been reclaimed")]
    StaleHandle { kind: ValueKind, index: u32 },

    /// The value's reference count is at its maximum; no reference was taken.
    #[error("{kind} at slot {index} cannot take another reference")]
    RefCountOverflow { kind: ValueKind, index: u32 },

    /// A managed string could not be materialized.
    #[error("string materialization failed: {0}")]
    StringBuffer(#[from] StringBufferError),

    /// No extension is registered at this index.
    #[error("no extension registered at index {index}")]
    ExtensionNotFound { index: u32 },

    /// No registered function matches the request.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// Generic native error raised by an implementation.
    #[error("native error: {message}")]
    Other { message: String },
}

impl NativeError {
    /// Create a generic native error.
    pub fn other(message: impl Into<String>) -> Self {
        NativeError::Other {
            message: message.into(),
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while validating or registering an extension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// An extension, field or function was given an empty name.
    #[error("empty {what} name in extension '{extension}'")]
    EmptyName {
        /// What was unnamed ("extension", "field", "function").
        what: &'static str,
        extension: String,
    },

    /// A name contains an interior NUL and cannot cross the boundary.
    #[error("{what} name {name:?} contains a NUL byte")]
    InvalidName { what: &'static str, name: String },

    /// Two fields of one extension share a name.
    #[error("duplicate field '{field}' in extension '{extension}'")]
    DuplicateField { extension: String, field: String },

    /// Two functions of one extension share a name.
    #[error("duplicate function '{function}' in extension '{extension}'")]
    DuplicateFunction { extension: String, function: String },

    /// A field and a function of one extension share a name.
    #[error("'{name}' is both a field and a function in extension '{extension}'")]
    NameConflict { extension: String, name: String },

    /// A field or function list does not fit the boundary's 32-bit counts.
    #[error("extension '{extension}' declares too many {what} ({count})")]
    TooManyEntries {
        extension: String,
        what: &'static str,
        count: usize,
    },

    /// An extension with this name is registered and the registry rejects shadowing.
    #[error("duplicate extension: '{name}' already registered at index {existing}")]
    DuplicateExtension { name: String, existing: u32 },

    /// Every 32-bit registration index has been handed out.
    #[error("registration index space exhausted")]
    IndexExhausted,

    /// The registry configuration can no longer be changed.
    #[error("registry already holds {registered} extensions; configure it before registering")]
    AlreadyInUse { registered: usize },
}

// ============================================================================
// String Buffer Errors
// ============================================================================

/// Errors from materializing a managed string into a caller buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StringBufferError {
    /// Buffer too small; nothing was written.
    #[error("buffer of {capacity} bytes cannot hold {required} bytes")]
    InsufficientCapacity { required: usize, capacity: usize },

    /// The string handle no longer refers to a live value.
    #[error("stale string handle: slot {index} has been reclaimed")]
    StaleHandle { index: u32 },
}

impl StringBufferError {
    /// Size the caller needs to retry with, when known.
    pub fn required(&self) -> Option<usize> {
        match self {
            StringBufferError::InsufficientCapacity { required, .. } => Some(*required),
            StringBufferError::StaleHandle { .. } => None,
        }
    }
}

/// An unknown value kind tag arrived at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown value kind tag {0}")]
pub struct ValueKindError(pub u8);
