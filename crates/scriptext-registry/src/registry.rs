//! ExtensionRegistry - storage and lookup for registered extensions.
//!
//! This module provides [`ExtensionRegistry`], the append-only store every
//! native extension is registered into. Each registration is validated and
//! assigned the next [`ExtensionIndex`].
//!
//! # Storage Model
//!
//! - **Extensions**: an arena (`Vec`) in registration order. The index is the
//!   arena position, so lookup by index is O(1).
//! - **Names**: name -> every index registered under that name. Duplicate
//!   names are allowed or rejected according to [`RegistryConfig`].
//! - **Functions**: [`SymbolHash`] -> (extension, function position) for host
//!   dispatch without a name lookup. A later registration of the same
//!   symbol shadows the earlier one.
//!
//! # Thread Safety
//!
//! `ExtensionRegistry` is not synchronized. The process-wide instance in
//! [`crate::global`] wraps one in a mutex.
//!
//! # Example
//!
//! ```
//! use scriptext_registry::{ExtensionIndex, ExtensionRegistry};
//! use scriptext_core::{ExtensionDescriptor, FieldDescriptor};
//!
//! let mut registry = ExtensionRegistry::new();
//! let index = registry
//!     .register(
//!         ExtensionDescriptor::new("math").with_field(FieldDescriptor::new("PI", 3.14159f64)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(index, ExtensionIndex::new(0));
//! assert_eq!(registry.get(index).unwrap().name(), "math");
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

use scriptext_core::{
    EngineValue, ExtensionDescriptor, FunctionDescriptor, HostHeap, NativeError,
    RegistrationError, SymbolHash,
};

use crate::{DuplicatePolicy, ExtensionIndex, RegistryConfig};

/// An extension after registration: its descriptor plus its assigned index.
#[derive(Debug)]
pub struct RegisteredExtension {
    index: ExtensionIndex,
    descriptor: ExtensionDescriptor,
}

impl RegisteredExtension {
    #[inline]
    pub fn index(&self) -> ExtensionIndex {
        self.index
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    #[inline]
    pub fn descriptor(&self) -> &ExtensionDescriptor {
        &self.descriptor
    }

    /// Find one of this extension's functions by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.descriptor.function(name)
    }
}

/// Append-only registry of extensions.
#[derive(Debug, Default)]
pub struct ExtensionRegistry {
    config: RegistryConfig,

    /// Registered extensions; position == index.
    extensions: Vec<Arc<RegisteredExtension>>,

    /// Name -> indices, oldest first.
    by_name: FxHashMap<String, Vec<ExtensionIndex>>,

    /// Function hash -> (extension, position in its function list).
    functions: FxHashMap<SymbolHash, (ExtensionIndex, usize)>,
}

impl ExtensionRegistry {
    /// Create a new empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty registry.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Replace the configuration. Only allowed while the registry is empty.
    pub fn set_config(&mut self, config: RegistryConfig) -> Result<(), RegistrationError> {
        if !self.extensions.is_empty() {
            return Err(RegistrationError::AlreadyInUse {
                registered: self.extensions.len(),
            });
        }
        self.config = config;
        Ok(())
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Validate and register an extension, returning its index.
    ///
    /// Indices start at 0 and increase by one per successful registration.
    /// A failed registration consumes no index.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn register(
        &mut self,
        descriptor: ExtensionDescriptor,
    ) -> Result<ExtensionIndex, RegistrationError> {
        descriptor.validate()?;

        let raw = u32::try_from(self.extensions.len())
            .map_err(|_| RegistrationError::IndexExhausted)?;
        let index = ExtensionIndex::new(raw);

        if let Some(existing) = self.find(descriptor.name()) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistrationError::DuplicateExtension {
                        name: descriptor.name().to_owned(),
                        existing: existing.index().get(),
                    });
                }
                DuplicatePolicy::Warn => {
                    tracing::warn!(
                        extension = descriptor.name(),
                        existing = %existing.index(),
                        new = %index,
                        "extension name registered again; name lookups now resolve to the newer one"
                    );
                }
            }
        }

        for (position, function) in descriptor.functions().iter().enumerate() {
            let hash = function.hash(descriptor.name());
            if let Some((previous, _)) = self.functions.insert(hash, (index, position)) {
                tracing::debug!(
                    function = function.name(),
                    %hash,
                    shadowed = %previous,
                    "function symbol shadowed"
                );
            }
        }

        tracing::debug!(
            extension = descriptor.name(),
            %index,
            fields = descriptor.field_count(),
            functions = descriptor.function_count(),
            "registered extension"
        );

        self.by_name
            .entry(descriptor.name().to_owned())
            .or_default()
            .push(index);
        self.extensions
            .push(Arc::new(RegisteredExtension { index, descriptor }));

        Ok(index)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Look up an extension by its registration index.
    pub fn get(&self, index: ExtensionIndex) -> Option<&Arc<RegisteredExtension>> {
        self.extensions.get(index.as_usize())
    }

    /// Number of registered extensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Extensions in registration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Arc<RegisteredExtension>> + '_ {
        self.extensions.iter()
    }

    /// Extensions most recently registered first.
    pub fn iter_recent_first(&self) -> impl Iterator<Item = &Arc<RegisteredExtension>> + '_ {
        self.extensions.iter().rev()
    }

    /// The most recent extension registered under `name`.
    pub fn find(&self, name: &str) -> Option<&Arc<RegisteredExtension>> {
        let index = *self.by_name.get(name)?.last()?;
        self.get(index)
    }

    /// Every extension registered under `name`, oldest first.
    pub fn find_all(&self, name: &str) -> Vec<&Arc<RegisteredExtension>> {
        self.by_name
            .get(name)
            .map(|indices| indices.iter().filter_map(|i| self.get(*i)).collect())
            .unwrap_or_default()
    }

    /// Resolve a function hash to its extension and descriptor.
    pub fn resolve(
        &self,
        hash: SymbolHash,
    ) -> Option<(&Arc<RegisteredExtension>, &FunctionDescriptor)> {
        let (index, position) = *self.functions.get(&hash)?;
        let extension = self.get(index)?;
        let function = extension.descriptor().functions().get(position)?;
        Some((extension, function))
    }

    // ==========================================================================
    // Invocation
    // ==========================================================================

    /// Invoke function `function` of the extension at `index`.
    pub fn call(
        &self,
        index: ExtensionIndex,
        function: &str,
        actual: &[EngineValue],
        heap: &dyn HostHeap,
    ) -> Result<(), NativeError> {
        let extension = self
            .get(index)
            .ok_or(NativeError::ExtensionNotFound { index: index.get() })?;
        let descriptor = extension.function(function).ok_or_else(|| {
            NativeError::FunctionNotFound(format!("{}.{}", extension.name(), function))
        })?;
        descriptor.invoke(actual, heap)
    }

    /// Invoke the function registered under `hash`.
    pub fn call_by_hash(
        &self,
        hash: SymbolHash,
        actual: &[EngineValue],
        heap: &dyn HostHeap,
    ) -> Result<(), NativeError> {
        let (_, function) = self
            .resolve(hash)
            .ok_or_else(|| NativeError::FunctionNotFound(hash.to_string()))?;
        function.invoke(actual, heap)
    }
}
