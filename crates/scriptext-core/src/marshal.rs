//! Marshalling engine values into typed function arguments.
//!
//! The host hands over its own values ([`EngineValue`]); each declared
//! parameter kind decides how the value is converted:
//!
//! | Declared | Accepts | Conversion |
//! |---|---|---|
//! | `bool` | Boolean | none |
//! | `float` | Number | round to nearest f32 |
//! | `double` | Number | none |
//! | `uint` | Number | ToUint32 |
//! | `string` | String | borrowed handle |
//! | `object` | Object | borrowed handle |

use std::fmt;

use crate::coerce::{to_float32, to_uint32};
use crate::error::{ConversionError, NativeError};
use crate::runtime::{ObjectHandle, StringHandle};
use crate::{FunctionArg, ValueKind};

/// A value in the host engine's own representation.
#[derive(Clone, Copy, PartialEq)]
pub enum EngineValue {
    Undefined,
    Null,
    Boolean(bool),
    /// Engine numbers are doubles
    Number(f64),
    String(StringHandle),
    Object(ObjectHandle),
}

impl EngineValue {
    /// Human-readable name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            EngineValue::Undefined => "undefined",
            EngineValue::Null => "null",
            EngineValue::Boolean(_) => "boolean",
            EngineValue::Number(_) => "number",
            EngineValue::String(_) => "string",
            EngineValue::Object(_) => "object",
        }
    }
}

impl fmt::Debug for EngineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineValue::Undefined => write!(f, "Undefined"),
            EngineValue::Null => write!(f, "Null"),
            EngineValue::Boolean(v) => write!(f, "Boolean({})", v),
            EngineValue::Number(v) => write!(f, "Number({})", v),
            EngineValue::String(h) => write!(f, "String({:?})", h),
            EngineValue::Object(h) => write!(f, "Object({:?})", h),
        }
    }
}

/// Convert one engine value to the declared kind.
pub fn marshal_arg(kind: ValueKind, value: &EngineValue) -> Result<FunctionArg, ConversionError> {
    let arg = match (kind, value) {
        (ValueKind::Boolean, EngineValue::Boolean(v)) => FunctionArg::Boolean(*v),
        (ValueKind::Float32, EngineValue::Number(n)) => FunctionArg::Float32(to_float32(*n)),
        (ValueKind::Float64, EngineValue::Number(n)) => FunctionArg::Float64(*n),
        (ValueKind::UInt32, EngineValue::Number(n)) => FunctionArg::UInt32(to_uint32(*n)),
        (ValueKind::String, EngineValue::String(h)) => FunctionArg::String(*h),
        (ValueKind::Object, EngineValue::Object(h)) => FunctionArg::Object(*h),
        (kind, other) => {
            return Err(ConversionError::TypeMismatch {
                expected: kind.name(),
                actual: other.type_name(),
            });
        }
    };
    tracing::trace!(%kind, ?value, ?arg, "marshalled argument");
    Ok(arg)
}

/// Convert a full actual-argument list against a parameter list.
///
/// `function` names the callee in errors.
pub fn marshal_args(
    function: &str,
    params: &[ValueKind],
    actual: &[EngineValue],
) -> Result<Vec<FunctionArg>, NativeError> {
    if params.len() != actual.len() {
        return Err(NativeError::ArgumentCountMismatch {
            function: function.to_owned(),
            expected: params.len(),
            actual: actual.len(),
        });
    }

    params
        .iter()
        .zip(actual)
        .enumerate()
        .map(|(index, (kind, value))| {
            marshal_arg(*kind, value).map_err(|source| NativeError::Argument {
                function: function.to_owned(),
                index,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_declared_kind() {
        let n = EngineValue::Number(-1.9);
        assert_eq!(
            marshal_arg(ValueKind::UInt32, &n),
            Ok(FunctionArg::UInt32(4294967295))
        );
        assert_eq!(
            marshal_arg(ValueKind::Float64, &n),
            Ok(FunctionArg::Float64(-1.9))
        );
        assert_eq!(
            marshal_arg(ValueKind::Float32, &n),
            Ok(FunctionArg::Float32(-1.9f32))
        );
    }

    #[test]
    fn uint_wraps_past_range() {
        assert_eq!(
            marshal_arg(ValueKind::UInt32, &EngineValue::Number(4294967296.5)),
            Ok(FunctionArg::UInt32(0))
        );
    }

    #[test]
    fn handles_pass_through() {
        let s = StringHandle::new(3, 1);
        let o = ObjectHandle::new(4, 0);
        assert_eq!(
            marshal_arg(ValueKind::String, &EngineValue::String(s)),
            Ok(FunctionArg::String(s))
        );
        assert_eq!(
            marshal_arg(ValueKind::Object, &EngineValue::Object(o)),
            Ok(FunctionArg::Object(o))
        );
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let err = marshal_arg(ValueKind::Boolean, &EngineValue::Number(1.0)).unwrap_err();
        assert_eq!(
            err,
            ConversionError::TypeMismatch {
                expected: "bool",
                actual: "number",
            }
        );
        assert!(marshal_arg(ValueKind::String, &EngineValue::Undefined).is_err());
        assert!(marshal_arg(ValueKind::Object, &EngineValue::Null).is_err());
    }

    #[test]
    fn marshal_args_preserves_order() {
        let args = marshal_args(
            "add",
            &[ValueKind::UInt32, ValueKind::UInt32],
            &[EngineValue::Number(2.0), EngineValue::Number(3.0)],
        )
        .unwrap();
        assert_eq!(args, vec![FunctionArg::UInt32(2), FunctionArg::UInt32(3)]);
    }

    #[test]
    fn marshal_args_count_mismatch() {
        let err = marshal_args("add", &[ValueKind::UInt32], &[]).unwrap_err();
        assert_eq!(
            err,
            NativeError::ArgumentCountMismatch {
                function: "add".into(),
                expected: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn marshal_args_reports_index() {
        let err = marshal_args(
            "f",
            &[ValueKind::UInt32, ValueKind::Boolean],
            &[EngineValue::Number(1.0), EngineValue::Null],
        )
        .unwrap_err();
        assert!(matches!(err, NativeError::Argument { index: 1, .. }));
    }
}
