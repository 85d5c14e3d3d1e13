//! Rasterization.
//!
//! The compositor draws into a reused `vello_cpu` context and hands back a premultiplied
//! [`backend::FrameRGBA`].

/// Output frame type.
pub mod backend;
/// CPU compositor.
pub mod cpu;
/// Fill/outline styles derived from options.
pub mod paint;
