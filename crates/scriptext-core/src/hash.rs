//! Deterministic identities for registered extension symbols.
//!
//! A [`SymbolHash`] is computed from the owning extension's name, the
//! symbol name and (for functions) the ordered parameter kinds. The host can
//! compute it before or after registration and use it to dispatch a call
//! without walking the registry.
//!
//! # Examples
//!
//! ```
//! use scriptext_core::{SymbolHash, ValueKind};
//!
//! let a = SymbolHash::from_function("math", "add", &[ValueKind::UInt32, ValueKind::UInt32]);
//! let b = SymbolHash::from_function("math", "add", &[ValueKind::UInt32, ValueKind::UInt32]);
//! assert_eq!(a, b);
//!
//! let c = SymbolHash::from_function("math", "add", &[ValueKind::Float64, ValueKind::Float64]);
//! assert_ne!(a, c);
//! ```

use std::fmt;

use xxhash_rust::xxh64::xxh64;

use crate::ValueKind;

/// Domain-specific mixing constants.
mod hash_constants {
    /// Separator mixed between path components.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for extension hashes.
    pub const EXTENSION: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for field hashes.
    pub const FIELD: u64 = 0x1a095090689d4647;

    /// Domain marker for function hashes.
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;

    /// Parameter position markers so that order matters.
    pub const PARAM_MARKERS: [u64; 8] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
    ];
}

/// A deterministic 64-bit identity of an extension, field or function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolHash(pub u64);

impl SymbolHash {
    /// Hash of an extension name.
    #[inline]
    pub fn from_extension(name: &str) -> Self {
        SymbolHash(hash_constants::EXTENSION ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash of a field within an extension.
    #[inline]
    pub fn from_field(extension: &str, field: &str) -> Self {
        let owner = Self::from_extension(extension);
        SymbolHash(
            owner
                .0
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(hash_constants::FIELD ^ xxh64(field.as_bytes(), 0)),
        )
    }

    /// Hash of a function within an extension, including its parameter kinds.
    ///
    /// Parameter order matters: `(uint, bool)` and `(bool, uint)` differ.
    pub fn from_function(extension: &str, name: &str, params: &[ValueKind]) -> Self {
        let owner = Self::from_extension(extension);
        let mut hash = owner
            .0
            .wrapping_mul(hash_constants::SEP)
            .wrapping_add(hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0));
        for (i, kind) in params.iter().enumerate() {
            let marker = hash_constants::PARAM_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(marker ^ u64::from(kind.tag()));
        }
        SymbolHash(hash)
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SymbolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolHash({:#018x})", self.0)
    }
}

impl fmt::Display for SymbolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
