use crate::foundation::core::{FrameSize, Rect};
use crate::scene::model::{Band, WatermarkOptions};

/// Distance between the watermark and the frame edges it is anchored to, as a share of width.
pub const WATERMARK_MARGIN_RATIO: f64 = 0.04;

/// Frame-space rectangle of the watermark.
///
/// Width is `size`% of the frame width and height follows the watermark's own aspect
/// (`w / h`). Returns `None` for a degenerate frame or aspect.
pub fn watermark_rect(opts: &WatermarkOptions, image_aspect: f64, frame: FrameSize) -> Option<Rect> {
    if frame.is_degenerate() || !image_aspect.is_finite() || image_aspect <= 0.0 {
        return None;
    }
    let (fw, fh) = (frame.width_f64(), frame.height_f64());
    let w = fw * (opts.size / 100.0);
    let h = w / image_aspect;
    let margin = fw * WATERMARK_MARGIN_RATIO;

    let place = |band: Band, extent: f64, size: f64| match band {
        Band::Start => margin,
        Band::Center => (extent - size) / 2.0,
        Band::End => extent - size - margin,
    };
    let x = place(opts.position.horizontal(), fw, w);
    let y = place(opts.position.vertical(), fh, h);
    Some(Rect::new(x, y, x + w, y + h))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/watermark.rs"]
mod tests;
