//! Extension descriptors: a named bundle of fields and functions.

use rustc_hash::FxHashSet;

use crate::error::RegistrationError;
use crate::{FieldDescriptor, FunctionDescriptor};

/// Description of one extension, as built by a native module.
///
/// Index assignment and linking belong to the registry; a descriptor only
/// says what the extension exposes.
///
/// # Example
///
/// ```
/// use scriptext_core::{
///     CallContext, ExtensionDescriptor, FieldDescriptor, FunctionDescriptor, ValueKind,
/// };
///
/// let ext = ExtensionDescriptor::new("math")
///     .with_field(FieldDescriptor::new("PI", 3.14159f64))
///     .with_function(FunctionDescriptor::new(
///         "add",
///         [ValueKind::UInt32, ValueKind::UInt32],
///         |_: &mut CallContext<'_>| Ok(()),
///     ));
///
/// assert_eq!(ext.field_count(), 1);
/// assert_eq!(ext.function_count(), 1);
/// assert!(ext.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ExtensionDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    functions: Vec<FunctionDescriptor>,
}

impl ExtensionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Add a field (builder style).
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a function (builder style).
    pub fn with_function(mut self, function: FunctionDescriptor) -> Self {
        self.functions.push(function);
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn add_function(&mut self, function: FunctionDescriptor) -> &mut Self {
        self.functions.push(function);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Functions in declaration order.
    #[inline]
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Find a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.iter().find(|f| f.name() == name)
    }

    /// Check the descriptor before it is registered.
    ///
    /// Names must be non-empty and NUL-free. Field names and function names
    /// must be unique within the extension, and no name may be used for both.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        self.check_name("extension", &self.name)?;

        for (what, count) in [
            ("fields", self.fields.len()),
            ("functions", self.functions.len()),
        ] {
            if u32::try_from(count).is_err() {
                return Err(RegistrationError::TooManyEntries {
                    extension: self.name.clone(),
                    what,
                    count,
                });
            }
        }

        let mut fields = FxHashSet::default();
        for field in &self.fields {
            self.check_name("field", &field.name)?;
            if !fields.insert(field.name.as_str()) {
                return Err(RegistrationError::DuplicateField {
                    extension: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let mut functions = FxHashSet::default();
        for function in &self.functions {
            self.check_name("function", function.name())?;
            if !functions.insert(function.name()) {
                return Err(RegistrationError::DuplicateFunction {
                    extension: self.name.clone(),
                    function: function.name().to_owned(),
                });
            }
            if fields.contains(function.name()) {
                return Err(RegistrationError::NameConflict {
                    extension: self.name.clone(),
                    name: function.name().to_owned(),
                });
            }
        }

        Ok(())
    }

    fn check_name(&self, what: &'static str, name: &str) -> Result<(), RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::EmptyName {
                what,
                extension: self.name.clone(),
            });
        }
        if name.contains('\0') {
            return Err(RegistrationError::InvalidName {
                what,
                name: name.to_owned(),
            });
        }
        Ok(())
    }
}
