use std::io::Cursor;
use std::sync::OnceLock;

use anyhow::Context;
use regex::Regex;

use crate::foundation::core::AspectRatio;
use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::render::backend::FrameRGBA;

pub const FILE_PREFIX: &str = "quotegenx";
/// Slug used when no visual theme is active.
pub const DEFAULT_THEME_SLUG: &str = "masterpiece";
/// File name carried by share payloads.
pub const SHARE_FILE_NAME: &str = "quotegenx-masterpiece.png";
pub const PNG_MIME: &str = "image/png";

static PARENTHESIZED: OnceLock<Regex> = OnceLock::new();
static DISALLOWED: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("slug patterns are valid constant regexes"))
}

/// Encode a frame as PNG (straight alpha, RGBA8).
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_png(frame: &FrameRGBA) -> QuotegenxResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| QuotegenxError::export("frame byte length does not match its size"))?;

    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out.into_inner())
}

/// File-name fragment for a visual theme: lower-case, parenthesised text dropped, words joined
/// with `_`. No theme, `"None"`, or a theme with nothing usable yields `masterpiece`.
pub fn theme_slug(theme: Option<&str>) -> String {
    let Some(theme) = theme.map(str::trim).filter(|t| !t.is_empty() && *t != "None") else {
        return DEFAULT_THEME_SLUG.to_string();
    };

    let lower = theme.to_lowercase();
    let no_parens = cached(&PARENTHESIZED, r"\s*\(.*\)\s*").replace_all(&lower, "");
    let cleaned = cached(&DISALLOWED, r"[^a-z0-9\s-]").replace_all(no_parens.trim(), "");
    let slug = cached(&WHITESPACE, r"\s+").replace_all(cleaned.trim(), "_");

    if slug.is_empty() {
        DEFAULT_THEME_SLUG.to_string()
    } else {
        slug.into_owned()
    }
}

/// Suggested download name, e.g. `quotegenx_cyberpunk_neon_9x16.png`.
pub fn export_filename(theme: Option<&str>, aspect: AspectRatio) -> String {
    format!("{FILE_PREFIX}_{}_{}.png", theme_slug(theme), aspect.slug())
}

/// Encoded image plus the name it should be saved under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PngExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PngExport {
    pub fn from_frame(
        frame: &FrameRGBA,
        theme: Option<&str>,
        aspect: AspectRatio,
    ) -> QuotegenxResult<Self> {
        Ok(Self {
            file_name: export_filename(theme, aspect),
            bytes: encode_png(frame)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
