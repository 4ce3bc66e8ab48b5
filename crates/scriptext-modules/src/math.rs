//! Math extension providing constants and a few numeric functions.
//!
//! Registered under the name `math`. Each function writes its result into
//! the [`ResultSlot`] passed to [`extension`].

use scriptext_core::{
    CallContext, ExtensionDescriptor, FieldDescriptor, FunctionDescriptor, ValueKind,
};

use crate::ResultSlot;

pub const NAME: &str = "math";

// =============================================================================
// FUNCTIONS
// =============================================================================

/// Sum of two `uint`s, wrapping like script integer arithmetic.
pub fn add(a: u32, b: u32) -> u32 {
    a.wrapping_add(b)
}

/// Larger of two values.
pub fn max(a: f64, b: f64) -> f64 {
    a.max(b)
}

/// `x` limited to `[lo, hi]`. If the bounds are reversed they are swapped.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    x.max(lo).min(hi)
}

/// Absolute value.
pub fn abs(x: f32) -> f32 {
    x.abs()
}

// =============================================================================
// EXTENSION
// =============================================================================

/// Build the `math` extension.
pub fn extension(results: &ResultSlot) -> ExtensionDescriptor {
    let add_out = results.clone();
    let max_out = results.clone();
    let clamp_out = results.clone();
    let abs_out = results.clone();

    ExtensionDescriptor::new(NAME)
        .with_field(FieldDescriptor::new("PI", std::f64::consts::PI))
        .with_field(FieldDescriptor::new("E", std::f64::consts::E))
        .with_field(FieldDescriptor::new("TAU", std::f64::consts::TAU))
        .with_function(FunctionDescriptor::new(
            "add",
            [ValueKind::UInt32, ValueKind::UInt32],
            move |ctx: &mut CallContext<'_>| {
                add_out.set(add(ctx.arg(0)?, ctx.arg(1)?));
                Ok(())
            },
        ))
        .with_function(FunctionDescriptor::new(
            "max",
            [ValueKind::Float64, ValueKind::Float64],
            move |ctx: &mut CallContext<'_>| {
                max_out.set(max(ctx.arg(0)?, ctx.arg(1)?));
                Ok(())
            },
        ))
        .with_function(FunctionDescriptor::new(
            "clamp",
            [ValueKind::Float64, ValueKind::Float64, ValueKind::Float64],
            move |ctx: &mut CallContext<'_>| {
                clamp_out.set(clamp(ctx.arg(0)?, ctx.arg(1)?, ctx.arg(2)?));
                Ok(())
            },
        ))
        .with_function(FunctionDescriptor::new(
            "abs",
            [ValueKind::Float32],
            move |ctx: &mut CallContext<'_>| {
                abs_out.set(abs(ctx.arg(0)?));
                Ok(())
            },
        ))
}
