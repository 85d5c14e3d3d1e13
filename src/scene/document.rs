use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{AspectRatio, FrameSize};
use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::scene::model::{StyleOptions, WatermarkOptions};
use crate::transform::controller::ImageTransform;

/// Everything needed to render one card from disk, as stored in a JSON document.
///
/// Image and font paths are resolved against the document's directory when it was loaded with
/// [`RenderDocument::from_path`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RenderDocument {
    pub quote: String,
    pub style: StyleOptions,
    pub watermark: WatermarkOptions,
    pub aspect_ratio: AspectRatio,
    /// Name of the visual theme the background was generated with, used for file names.
    pub visual_theme: Option<String>,
    pub transform: ImageTransform,
    pub background: Option<PathBuf>,
    pub watermark_image: Option<PathBuf>,
    /// Directory of TTF/OTF/TTC files to register before rendering.
    pub fonts: Option<PathBuf>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl RenderDocument {
    /// Parse a render document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> QuotegenxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| QuotegenxError::serde(format!("parse render document JSON: {e}")))
    }

    /// Parse a render document from a JSON file; relative paths inside it resolve next to it.
    pub fn from_path(path: impl AsRef<Path>) -> QuotegenxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            QuotegenxError::validation(format!("open render document '{}': {e}", path.display()))
        })?;
        let mut doc = Self::from_reader(BufReader::new(f))?;
        doc.base_dir = path.parent().map(Path::to_path_buf);
        Ok(doc)
    }

    pub fn validate(&self) -> QuotegenxResult<()> {
        self.style.validate()?;
        self.watermark.validate()
    }

    pub fn frame(&self) -> FrameSize {
        FrameSize::for_aspect(self.aspect_ratio)
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn background_path(&self) -> Option<PathBuf> {
        self.background.as_deref().map(|p| self.resolve(p))
    }

    pub fn watermark_path(&self) -> Option<PathBuf> {
        self.watermark_image.as_deref().map(|p| self.resolve(p))
    }

    pub fn font_dir(&self) -> Option<PathBuf> {
        self.fonts.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
