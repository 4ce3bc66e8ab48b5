//! Function arguments as tagged values.
//!
//! [`FunctionArg`] is the uniform representation a native function sees for
//! each actual argument. [`FromArg`] extracts the plain Rust value, failing
//! when asked for a kind other than the one the argument carries.

use crate::error::ConversionError;
use crate::runtime::{ObjectHandle, StringHandle};
use crate::ValueKind;

/// One actual argument, tagged by kind.
///
/// String and object payloads are raw handles; native code reaches them as
/// borrowed handles through [`CallContext`](crate::CallContext).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FunctionArg {
    Boolean(bool),
    Float32(f32),
    Float64(f64),
    UInt32(u32),
    String(StringHandle),
    Object(ObjectHandle),
}

impl FunctionArg {
    /// The kind of this argument.
    pub fn kind(&self) -> ValueKind {
        match self {
            FunctionArg::Boolean(_) => ValueKind::Boolean,
            FunctionArg::Float32(_) => ValueKind::Float32,
            FunctionArg::Float64(_) => ValueKind::Float64,
            FunctionArg::UInt32(_) => ValueKind::UInt32,
            FunctionArg::String(_) => ValueKind::String,
            FunctionArg::Object(_) => ValueKind::Object,
        }
    }

    /// Script-facing name of the kind.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }
}

impl From<bool> for FunctionArg {
    fn from(value: bool) -> Self {
        FunctionArg::Boolean(value)
    }
}

impl From<f32> for FunctionArg {
    fn from(value: f32) -> Self {
        FunctionArg::Float32(value)
    }
}

impl From<f64> for FunctionArg {
    fn from(value: f64) -> Self {
        FunctionArg::Float64(value)
    }
}

impl From<u32> for FunctionArg {
    fn from(value: u32) -> Self {
        FunctionArg::UInt32(value)
    }
}

impl From<StringHandle> for FunctionArg {
    fn from(value: StringHandle) -> Self {
        FunctionArg::String(value)
    }
}

impl From<ObjectHandle> for FunctionArg {
    fn from(value: ObjectHandle) -> Self {
        FunctionArg::Object(value)
    }
}

/// Extract a Rust value from a [`FunctionArg`] of the matching kind.
pub trait FromArg: Sized {
    /// The kind this type is read from.
    const ARG_KIND: ValueKind;

    fn from_arg(arg: &FunctionArg) -> Result<Self, ConversionError>;
}

macro_rules! impl_from_arg {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromArg for $ty {
                const ARG_KIND: ValueKind = ValueKind::$variant;

                fn from_arg(arg: &FunctionArg) -> Result<Self, ConversionError> {
                    match arg {
                        FunctionArg::$variant(v) => Ok(*v),
                        other => Err(ConversionError::TypeMismatch {
                            expected: Self::ARG_KIND.name(),
                            actual: other.type_name(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_from_arg!(
    bool => Boolean,
    f32 => Float32,
    f64 => Float64,
    u32 => UInt32,
    StringHandle => String,
    ObjectHandle => Object,
);
