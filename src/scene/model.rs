use serde::{Deserialize, Serialize};

use crate::assets::color::HexColor;
use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::text::measure::FontSpec;

/// One of the nine cells of a 3x3 placement grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridPosition {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// One axis of a [`GridPosition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Top or left.
    Start,
    Center,
    /// Bottom or right.
    End,
}

impl GridPosition {
    /// All nine cells, row by row.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Row of the cell: top, center, or bottom.
    pub fn vertical(self) -> Band {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Band::Start,
            Self::CenterLeft | Self::Center | Self::CenterRight => Band::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Band::End,
        }
    }

    /// Column of the cell: left, center, or right.
    pub fn horizontal(self) -> Band {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => Band::Start,
            Self::TopCenter | Self::Center | Self::BottomCenter => Band::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => Band::End,
        }
    }
}

/// Horizontal alignment of each line against the text column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Typography and text-decoration settings for the quote block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    /// CSS `font-family` list, e.g. `'Josefin Sans', sans-serif`.
    pub font_family: String,
    /// Main-line size in pixels; the attribution is drawn at 0.6 of it.
    pub font_size: u32,
    /// Fill colour of the quote and attribution.
    pub font_color: HexColor,
    /// Numeric weight token (`"400"`, `"700"`, ...); ignored while `is_bold` is set.
    pub font_weight: String,
    /// Forces weight 700.
    pub is_bold: bool,
    pub is_italic: bool,
    /// Grid cell of the text block; selects the column and the vertical placement.
    pub position: GridPosition,
    pub text_align: TextAlign,
    /// Stroke each run before filling it.
    pub text_outline_enabled: bool,
    pub text_outline_color: HexColor,
    /// Stroke width in pixels; scaled by 0.6 (at least 1) for the attribution.
    pub text_outline_width: f64,
    /// Paint a rounded box behind the text block.
    pub text_background_enabled: bool,
    pub text_background_color: HexColor,
    /// Box alpha in `[0, 1]`, applied on top of the colour's own alpha.
    pub text_background_opacity: f64,
    /// Space between the widest line and the box edge, in pixels.
    pub text_background_padding: f64,
    /// Corner radius in pixels, limited to half the box's shorter side when drawn.
    pub text_background_border_radius: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_family: "'Josefin Sans', sans-serif".to_string(),
            font_size: 64,
            font_color: HexColor::WHITE,
            font_weight: "400".to_string(),
            is_bold: false,
            is_italic: false,
            position: GridPosition::Center,
            text_align: TextAlign::Center,
            text_outline_enabled: false,
            text_outline_color: HexColor::BLACK,
            text_outline_width: 4.0,
            text_background_enabled: false,
            text_background_color: HexColor::BLACK,
            text_background_opacity: 0.5,
            text_background_padding: 24.0,
            text_background_border_radius: 16.0,
        }
    }
}

/// Weight used while `is_bold` is set.
pub const BOLD_WEIGHT: u16 = 700;
/// Weight used when the weight token does not parse.
pub const REGULAR_WEIGHT: u16 = 400;

impl StyleOptions {
    /// Reject a zero font size, negative or non-finite lengths, and an opacity outside `[0, 1]`.
    pub fn validate(&self) -> QuotegenxResult<()> {
        if self.font_size == 0 {
            return Err(QuotegenxError::validation("fontSize must be > 0"));
        }
        non_negative("textOutlineWidth", self.text_outline_width)?;
        non_negative("textBackgroundPadding", self.text_background_padding)?;
        non_negative(
            "textBackgroundBorderRadius",
            self.text_background_border_radius,
        )?;
        unit_interval("textBackgroundOpacity", self.text_background_opacity)
    }

    /// Effective weight: `is_bold` wins, otherwise the numeric token (400 if unparsable).
    pub fn effective_weight(&self) -> u16 {
        if self.is_bold {
            return BOLD_WEIGHT;
        }
        self.font_weight
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|w| (1..=1000).contains(w))
            .unwrap_or(REGULAR_WEIGHT)
    }

    /// Font used for the main quote lines.
    pub fn main_font(&self) -> FontSpec {
        self.font_at(self.font_size as f32)
    }

    /// Font for this style at an arbitrary size.
    pub fn font_at(&self, size_px: f32) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size_px,
            weight: self.effective_weight(),
            italic: self.is_italic,
        }
    }

    /// Whether an outline would actually be stroked.
    pub fn outline_active(&self) -> bool {
        self.text_outline_enabled && self.text_outline_width > 0.0
    }
}

/// Watermark placement settings. The bitmap itself is owned by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkOptions {
    /// Draw the watermark when a bitmap is present.
    pub enabled: bool,
    /// Grid cell; edge cells sit a 4% margin from the frame edges.
    pub position: GridPosition,
    /// Alpha in `[0, 1]`.
    pub opacity: f64,
    /// Width as a percentage of the frame width, in `(0, 100]`.
    pub size: f64,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            position: GridPosition::BottomRight,
            opacity: 0.7,
            size: 15.0,
        }
    }
}

impl WatermarkOptions {
    /// Reject an opacity outside `[0, 1]` or a size outside `(0, 100]`.
    pub fn validate(&self) -> QuotegenxResult<()> {
        unit_interval("watermark opacity", self.opacity)?;
        if !(self.size > 0.0 && self.size <= 100.0) {
            return Err(QuotegenxError::validation(
                "watermark size must be in (0, 100]",
            ));
        }
        Ok(())
    }
}

fn non_negative(name: &str, v: f64) -> QuotegenxResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(QuotegenxError::validation(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn unit_interval(name: &str, v: f64) -> QuotegenxResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(QuotegenxError::validation(format!(
            "{name} must be in [0, 1]"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
