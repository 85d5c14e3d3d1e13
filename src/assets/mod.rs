//! Colours and decoded bitmaps.

/// `#RRGGBB` colour parsing.
pub mod color;
/// Image decoding to premultiplied RGBA8.
pub mod decode;
/// Latest-request-wins holder for asynchronously decoded images.
pub mod slot;
