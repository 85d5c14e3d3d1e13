//! Background pan/zoom state and the input that drives it.

pub mod controller;
pub mod cover;
/// Pointer, wheel, and touch mapping.
pub mod gesture;
