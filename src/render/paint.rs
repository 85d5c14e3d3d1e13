use crate::foundation::core::Rgba8;
use crate::scene::model::StyleOptions;

/// Share of the main outline width used for the attribution outline.
pub const ATTRIBUTION_OUTLINE_RATIO: f64 = 0.6;
pub const MIN_ATTRIBUTION_OUTLINE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: Rgba8,
    pub width: f64,
}

/// Complete paint state for one draw call. Every draw sets all of it; nothing carries over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaintStyle {
    pub fill: Rgba8,
    /// Stroked underneath the fill when present.
    pub outline: Option<Outline>,
    /// Group opacity applied on top of the colours' own alpha.
    pub opacity: f32,
}

impl PaintStyle {
    pub fn solid(fill: Rgba8) -> Self {
        Self {
            fill,
            outline: None,
            opacity: 1.0,
        }
    }

    /// Opacity-only paint for image draws.
    pub fn image(opacity: f64) -> Self {
        Self {
            fill: Rgba8::WHITE,
            outline: None,
            opacity: opacity.clamp(0.0, 1.0) as f32,
        }
    }

    pub fn main_text(style: &StyleOptions) -> Self {
        Self {
            fill: style.font_color.rgba(),
            outline: style.outline_active().then(|| Outline {
                color: style.text_outline_color.rgba(),
                width: style.text_outline_width,
            }),
            opacity: 1.0,
        }
    }

    pub fn attribution_text(style: &StyleOptions) -> Self {
        Self {
            fill: style.font_color.rgba(),
            outline: style.outline_active().then(|| Outline {
                color: style.text_outline_color.rgba(),
                width: (style.text_outline_width * ATTRIBUTION_OUTLINE_RATIO)
                    .max(MIN_ATTRIBUTION_OUTLINE),
            }),
            opacity: 1.0,
        }
    }

    /// Text background box: the configured colour at the configured opacity.
    pub fn text_background(style: &StyleOptions) -> Self {
        Self::solid(
            style
                .text_background_color
                .rgba()
                .with_opacity(style.text_background_opacity),
        )
    }

    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
