use std::fmt;

/// Everything needed to pick a face and size for measuring or drawing a string.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// CSS `font-family` list.
    pub family: String,
    pub size_px: f32,
    pub weight: u16,
    pub italic: bool,
}

impl FontSpec {
    pub fn with_size(&self, size_px: f32) -> Self {
        Self {
            size_px,
            ..self.clone()
        }
    }
}

impl fmt::Display for FontSpec {
    /// CSS `font` shorthand, e.g. `italic 700 64px 'Josefin Sans', serif`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = if self.italic { "italic" } else { "normal" };
        write!(
            f,
            "{style} {} {}px {}",
            self.weight, self.size_px, self.family
        )
    }
}

/// Horizontal advance of a string in a given font, in pixels.
pub trait TextMeasure {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64;
}

/// Deterministic measurer: every character advances by `advance_em * size_px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceMeasure {
    pub advance_em: f64,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance_em * f64::from(font.size_px)
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for &mut M {
    fn measure(&mut self, font: &FontSpec, text: &str) -> f64 {
        (**self).measure(font, text)
    }
}
