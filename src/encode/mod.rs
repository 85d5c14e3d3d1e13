//! Export of rendered frames.
//!
//! Frames are encoded to PNG and handed to an [`sink::ExportSink`] (a directory, memory, or a
//! host share target).

/// PNG encoding and export file names.
pub mod png;
/// Export destinations.
pub mod sink;
