//! The closed set of value kinds that may cross the extension boundary.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ValueKindError;

/// Value kinds usable for extension fields and function arguments.
///
/// The discriminants are the boundary's wire tags and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[num_enum(error_type(name = ValueKindError, constructor = ValueKindError))]
#[repr(u8)]
pub enum ValueKind {
    Boolean = 0,
    Float32 = 1,
    Float64 = 2,
    /// Engine number converted with ToUint32.
    UInt32 = 3,
    String = 4,
    Object = 5,
}

impl ValueKind {
    /// Every kind, in tag order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Boolean,
        ValueKind::Float32,
        ValueKind::Float64,
        ValueKind::UInt32,
        ValueKind::String,
        ValueKind::Object,
    ];

    /// Script-facing name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Boolean => "bool",
            ValueKind::Float32 => "float",
            ValueKind::Float64 => "double",
            ValueKind::UInt32 => "uint",
            ValueKind::String => "string",
            ValueKind::Object => "object",
        }
    }

    /// Whether values of this kind live in the host heap and are reference counted.
    pub const fn is_ref_counted(self) -> bool {
        matches!(self, ValueKind::String | ValueKind::Object)
    }

    /// Whether values of this kind are produced from an engine number.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueKind::Float32 | ValueKind::Float64 | ValueKind::UInt32
        )
    }

    /// The boundary tag for this kind.
    #[inline]
    pub fn tag(self) -> u8 {
        self.into()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
