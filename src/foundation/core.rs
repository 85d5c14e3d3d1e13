use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{QuotegenxError, QuotegenxResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Output width every frame is laid out against, independent of the preview size.
pub const BASELINE_WIDTH: u32 = 1080;

/// Output aspect ratio written as `"W:H"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio {
    pub w: u32,
    pub h: u32,
}

impl AspectRatio {
    pub const SQUARE: Self = Self { w: 1, h: 1 };
    pub const PORTRAIT: Self = Self { w: 4, h: 5 };
    pub const STORY: Self = Self { w: 9, h: 16 };
    pub const LANDSCAPE: Self = Self { w: 16, h: 9 };

    pub fn new(w: u32, h: u32) -> QuotegenxResult<Self> {
        if w == 0 || h == 0 {
            return Err(QuotegenxError::validation(
                "aspect ratio terms must be > 0",
            ));
        }
        Ok(Self { w, h })
    }

    /// `"W:H"` rewritten as `"WxH"` for file names.
    pub fn slug(self) -> String {
        format!("{}x{}", self.w, self.h)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for AspectRatio {
    type Err = QuotegenxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| QuotegenxError::validation(format!("aspect ratio '{s}' is not W:H")))?;
        let parse = |part: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                QuotegenxError::validation(format!("aspect ratio '{s}' has a non-integer term"))
            })
        };
        Self::new(parse(w)?, parse(h)?)
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = QuotegenxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(value: AspectRatio) -> Self {
        value.to_string()
    }
}

/// Pixel dimensions of the output frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Baseline-width frame for `aspect`: `1080 x round(1080 * H / W)`.
    pub fn for_aspect(aspect: AspectRatio) -> Self {
        let height = (f64::from(BASELINE_WIDTH) * f64::from(aspect.h) / f64::from(aspect.w))
            .round()
            .max(1.0) as u32;
        Self {
            width: BASELINE_WIDTH,
            height,
        }
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f64() * 0.5, self.height_f64() * 0.5)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Replace alpha with `opacity` in `[0, 1]`, scaled by the existing alpha.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
