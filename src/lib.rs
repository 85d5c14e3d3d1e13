//! quotegenx composes quote cards: a cover-fit background that can be panned and zoomed, a
//! wrapped quote with an optional attribution line, and an optional watermark, rendered on the
//! CPU and exported as PNG.
//!
//! The usual entry points are:
//!
//! - [`EditorSession`] for interactive use: apply [`Command`]s, feed [`GestureEvent`]s, render
//! - [`RenderDocument`] plus [`EditorSession::from_document`] for batch rendering
//! - [`render_frame`] when the caller owns every input
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod editor;
pub mod encode;
pub mod layout;
pub mod quote;
pub mod render;
pub mod scene;
pub mod text;
pub mod transform;

pub use crate::foundation::core::{Affine, AspectRatio, FrameSize, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{QuotegenxError, QuotegenxResult};

pub use crate::assets::color::HexColor;
pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::slot::{AssetSlot, DecodeJob, DecodeOutcome, SettleOutcome, SourceId};
pub use crate::editor::session::EditorSession;
pub use crate::editor::state::{Command, EditorState, StyleCommand, WatermarkCommand, reduce};
pub use crate::encode::png::{PngExport, encode_png, export_filename};
pub use crate::encode::sink::{
    ExportSink, ExportStatus, FileSink, InMemorySink, ShareSink, ShareTarget,
};
pub use crate::layout::solver::{QuoteLayout, layout_quote};
pub use crate::quote::attribution::{ParsedQuote, parse_quote};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{CpuCompositor, RenderInput, render_frame};
pub use crate::scene::document::RenderDocument;
pub use crate::scene::model::{GridPosition, StyleOptions, TextAlign, WatermarkOptions};
pub use crate::text::engine::TextEngine;
pub use crate::text::measure::{FixedAdvanceMeasure, FontSpec, TextMeasure};
pub use crate::transform::controller::{ImageTransform, TransformController};
pub use crate::transform::gesture::{CaptureHost, GestureEvent, GestureMapper, Viewport};
