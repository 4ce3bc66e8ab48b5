//! Field descriptors: named constants an extension exposes.

use crate::ValueKind;

/// Value of an extension field.
///
/// The variant is the kind, so a field can never claim one kind and carry
/// another. Fields cannot be objects.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    Float32(f32),
    Float64(f64),
    UInt32(u32),
    String(String),
}

impl FieldValue {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Boolean(_) => ValueKind::Boolean,
            FieldValue::Float32(_) => ValueKind::Float32,
            FieldValue::Float64(_) => ValueKind::Float64,
            FieldValue::UInt32(_) => ValueKind::UInt32,
            FieldValue::String(_) => ValueKind::String,
        }
    }

    /// The value as an engine number, for the numeric kinds.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Float32(v) => Some(f64::from(*v)),
            FieldValue::Float64(v) => Some(*v),
            FieldValue::UInt32(v) => Some(f64::from(*v)),
            FieldValue::Boolean(_) | FieldValue::String(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float32(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float64(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::UInt32(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

/// A named constant exposed by an extension.
///
/// # Example
///
/// ```
/// use scriptext_core::{FieldDescriptor, ValueKind};
///
/// let pi = FieldDescriptor::new("PI", std::f64::consts::PI);
/// assert_eq!(pi.kind(), ValueKind::Float64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value: FieldValue,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Declared kind, derived from the value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}
