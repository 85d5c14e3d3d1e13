//! Pure geometry for the quote block and the watermark.
//!
//! Nothing here draws. Text width comes from a [`crate::TextMeasure`] so the same code runs
//! against real fonts and against the fixed-advance measurer used in tests.

pub mod solver;
pub mod watermark;
pub mod wrap;
