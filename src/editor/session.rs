use std::path::Path;

use anyhow::Context;

use crate::assets::decode::PreparedImage;
use crate::assets::slot::{AssetSlot, DecodeJob, DecodeOutcome, SettleOutcome, SourceId};
use crate::editor::state::{Command, EditorState, reduce};
use crate::encode::png::PngExport;
use crate::encode::sink::{ExportSink, ExportStatus};
use crate::foundation::core::FrameSize;
use crate::foundation::error::QuotegenxResult;
use crate::quote::attribution::parse_quote;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuCompositor, RenderInput};
use crate::scene::document::RenderDocument;
use crate::text::engine::TextEngine;
use crate::transform::controller::{ImageTransform, TransformController};
use crate::transform::gesture::{CaptureHost, GestureEvent, GestureMapper, NoCapture, Viewport};

/// A live editing surface: state, background transform, decoded images, fonts, and renderer.
///
/// All mutation goes through this type, one call at a time, so gesture and edit order is the
/// order of the calls.
#[derive(Debug)]
pub struct EditorSession<H: CaptureHost + Clone = NoCapture> {
    state: EditorState,
    controller: TransformController,
    gestures: GestureMapper<H>,
    background: AssetSlot,
    watermark: AssetSlot,
    text: TextEngine,
    compositor: CpuCompositor,
}

impl EditorSession<NoCapture> {
    pub fn new(state: EditorState) -> Self {
        Self::with_capture_host(state, NoCapture)
    }

    /// Build a session from a document on disk: fonts, images, and the stored transform.
    ///
    /// Missing fonts or undecodable images are logged and rendering proceeds without them. An
    /// image path that cannot be read is an error.
    pub fn from_document(doc: &RenderDocument) -> QuotegenxResult<Self> {
        doc.validate()?;
        let mut session = Self::new(EditorState {
            quote: doc.quote.clone(),
            style: doc.style.clone(),
            watermark: doc.watermark.clone(),
            aspect_ratio: doc.aspect_ratio,
            visual_theme: doc.visual_theme.clone(),
        });

        if let Err(err) = session.text.load_env_fonts() {
            tracing::warn!(%err, "font directory from environment not loaded");
        }
        if let Some(dir) = doc.font_dir()
            && let Err(err) = session.text.load_dir(&dir)
        {
            tracing::warn!(dir = %dir.display(), %err, "document font directory not loaded");
        }
        if let Some(path) = doc.background_path() {
            session.load_background_file(&path)?;
        }
        if let Some(path) = doc.watermark_path() {
            session.load_watermark_file(&path)?;
        }
        session.controller.restore(doc.transform);
        Ok(session)
    }
}

impl<H: CaptureHost + Clone> EditorSession<H> {
    pub fn with_capture_host(state: EditorState, host: H) -> Self {
        let frame = FrameSize::for_aspect(state.aspect_ratio);
        Self {
            state,
            controller: TransformController::new(frame),
            gestures: GestureMapper::new(host),
            background: AssetSlot::new("background"),
            watermark: AssetSlot::new("watermark"),
            text: TextEngine::new(),
            compositor: CpuCompositor::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn frame(&self) -> FrameSize {
        self.controller.frame()
    }

    pub fn transform(&self) -> ImageTransform {
        self.controller.current()
    }

    pub fn text(&self) -> &TextEngine {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    pub fn background_image(&self) -> Option<&PreparedImage> {
        self.background.image()
    }

    pub fn watermark_image(&self) -> Option<&PreparedImage> {
        self.watermark.image()
    }

    /// Apply an edit. A new aspect ratio rebuilds the frame and resets the transform.
    pub fn apply(&mut self, cmd: Command) -> &EditorState {
        let next = reduce(&self.state, cmd);
        if next.aspect_ratio != self.state.aspect_ratio {
            self.controller
                .set_frame(FrameSize::for_aspect(next.aspect_ratio));
        }
        self.state = next;
        &self.state
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.gestures.set_viewport(viewport);
    }

    pub fn handle_gesture(&mut self, event: &GestureEvent) -> Option<ImageTransform> {
        self.gestures.handle(&mut self.controller, event)
    }

    /// Restore a saved transform, clamped to the current background.
    pub fn set_transform(&mut self, t: ImageTransform) -> ImageTransform {
        self.controller.restore(t)
    }

    pub fn request_background(&mut self, source: SourceId, bytes: Vec<u8>) -> DecodeJob {
        self.background.request(source, bytes)
    }

    /// Accept a finished background decode. A change of image resets the transform.
    pub fn settle_background(&mut self, outcome: DecodeOutcome) -> SettleOutcome {
        let settled = self.background.settle(outcome);
        if settled.changed() {
            self.controller
                .set_image(self.background.image().and_then(PreparedImage::aspect));
        }
        settled
    }

    pub fn clear_background(&mut self) {
        self.background.clear();
        self.controller.set_image(None);
    }

    pub fn request_watermark(&mut self, source: SourceId, bytes: Vec<u8>) -> DecodeJob {
        self.watermark.request(source, bytes)
    }

    pub fn settle_watermark(&mut self, outcome: DecodeOutcome) -> SettleOutcome {
        self.watermark.settle(outcome)
    }

    pub fn clear_watermark(&mut self) {
        self.watermark.clear();
    }

    /// Decode `bytes` as the background right away.
    pub fn load_background_bytes(&mut self, bytes: Vec<u8>) -> SettleOutcome {
        let job = self.request_background(SourceId::of_bytes(&bytes), bytes);
        self.settle_background(job.run())
    }

    pub fn load_watermark_bytes(&mut self, bytes: Vec<u8>) -> SettleOutcome {
        let job = self.request_watermark(SourceId::of_bytes(&bytes), bytes);
        self.settle_watermark(job.run())
    }

    fn load_background_file(&mut self, path: &Path) -> QuotegenxResult<SettleOutcome> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read background image {}", path.display()))?;
        Ok(self.load_background_bytes(bytes))
    }

    fn load_watermark_file(&mut self, path: &Path) -> QuotegenxResult<SettleOutcome> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read watermark image {}", path.display()))?;
        Ok(self.load_watermark_bytes(bytes))
    }

    /// Render the current state.
    pub fn render(&mut self) -> QuotegenxResult<FrameRGBA> {
        let quote = parse_quote(&self.state.quote);
        let input = RenderInput {
            frame: self.controller.frame(),
            quote: &quote,
            style: &self.state.style,
            background: self.background.image(),
            transform: self.controller.current(),
            watermark: self.watermark.image(),
            watermark_options: &self.state.watermark,
        };
        self.compositor.render(&input, &mut self.text)
    }

    /// Render and encode, named after the active theme and aspect ratio.
    pub fn render_png(&mut self) -> QuotegenxResult<PngExport> {
        let frame = self.render()?;
        PngExport::from_frame(
            &frame,
            self.state.visual_theme.as_deref(),
            self.state.aspect_ratio,
        )
    }

    /// Render, encode, and hand the PNG to `sink`. Failures come back as a status.
    #[tracing::instrument(skip_all)]
    pub fn export(&mut self, sink: &mut dyn ExportSink) -> ExportStatus {
        match self.render_png() {
            Ok(export) => sink.deliver(&export),
            Err(err) => {
                tracing::warn!(%err, "export failed");
                ExportStatus::Failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
