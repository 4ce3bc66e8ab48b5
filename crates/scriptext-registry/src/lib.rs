//! Registration and lookup of native script extensions.
//!
//! - [`ExtensionRegistry`] - an owned registry instance
//! - [`global`] - the process-wide registry native modules extend at startup
//! - [`RegistryConfig`] - duplicate-name policy
//!
//! Descriptor types come from `scriptext-core` and are re-exported here.

mod config;
pub mod global;
mod ids;
mod registry;

pub use config::{DuplicatePolicy, RegistryConfig};
pub use ids::ExtensionIndex;
pub use registry::{ExtensionRegistry, RegisteredExtension};

pub use scriptext_core::{
    ExtensionDescriptor, FieldDescriptor, FunctionDescriptor, RegistrationError, SymbolHash,
};
