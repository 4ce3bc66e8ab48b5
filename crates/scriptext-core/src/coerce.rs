//! Numeric coercions from the engine's number representation.
//!
//! Engine numbers are IEEE-754 doubles. Integer kinds use the ECMAScript
//! ToUint32/ToInt32 rules: truncate toward zero, then wrap modulo 2^32.
//! Non-finite inputs become zero.

const TWO_POW_32: f64 = 4_294_967_296.0;

/// ECMAScript ToUint32.
///
/// ```
/// use scriptext_core::coerce::to_uint32;
///
/// assert_eq!(to_uint32(4294967296.5), 0);
/// assert_eq!(to_uint32(-1.9), 4294967295);
/// ```
pub fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = value.trunc();
    // rem_euclid keeps the result in [0, 2^32) for negative inputs too.
    let wrapped = truncated.rem_euclid(TWO_POW_32);
    wrapped as u32
}

/// ECMAScript ToInt32: the ToUint32 bits read as two's complement.
pub fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

/// Narrow an engine number to a 32-bit float, rounding to nearest.
#[inline]
pub fn to_float32(value: f64) -> f32 {
    value as f32
}
