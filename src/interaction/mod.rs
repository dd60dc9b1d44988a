//! Pointer picking, hover highlight and click resolution.

pub mod engine;
pub mod label;
pub mod picking;

pub use engine::{DetailRequest, InteractionEngine, ResolvedClick};
pub use picking::{Hit, Picker, Ray, ShapePicker};
