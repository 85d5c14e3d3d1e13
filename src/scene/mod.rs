/// Style and watermark options.
pub mod model;
/// JSON render documents.
pub mod document;
