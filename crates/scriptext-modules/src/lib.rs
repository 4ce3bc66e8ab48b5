//! Ready-made extensions for the scriptext boundary.
//!
//! - **math** - numeric constants and `add`, `max`, `clamp`, `abs`
//! - **text** - string length and case conversion, object retention
//!
//! Boundary functions return nothing, so each extension writes its results
//! into a [`ResultSlot`] supplied by the embedder:
//!
//! ```
//! use scriptext_core::{EngineValue, FieldValue, ManagedHeap};
//! use scriptext_modules::{ResultSlot, math};
//!
//! let results = ResultSlot::new();
//! let ext = math::extension(&results);
//! let heap = ManagedHeap::new();
//!
//! ext.function("add")
//!     .unwrap()
//!     .invoke(&[EngineValue::Number(2.0), EngineValue::Number(3.0)], &heap)
//!     .unwrap();
//! assert_eq!(results.take(), Some(FieldValue::UInt32(5)));
//! ```

pub mod math;
mod slot;
pub mod text;

pub use slot::{ResultSlot, RetainedObjects};
