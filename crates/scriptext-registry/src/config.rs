//! Registry configuration.

/// What the registry does when an extension name is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Register anyway and log a warning. Name lookup resolves to the most
    /// recent registration; earlier ones stay reachable by index.
    #[default]
    Warn,
    /// Refuse the second registration with `RegistrationError::DuplicateExtension`.
    Reject,
}

/// Runtime configuration for an [`ExtensionRegistry`](crate::ExtensionRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl RegistryConfig {
    /// Configuration that rejects duplicate extension names.
    pub fn strict() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
