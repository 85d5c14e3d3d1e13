use crate::foundation::core::{FrameSize, Point, Rect, Size};
use crate::transform::controller::ImageTransform;

/// Size of an image of aspect `image_aspect` (`w / h`) cover-fitted into `frame` at zoom 1.
///
/// The axis that fits tighter fills the frame exactly; the other overflows. Returns `None` for a
/// degenerate frame or a non-positive aspect.
pub fn cover_base_size(image_aspect: f64, frame: FrameSize) -> Option<Size> {
    if frame.is_degenerate() || !image_aspect.is_finite() || image_aspect <= 0.0 {
        return None;
    }
    let (fw, fh) = (frame.width_f64(), frame.height_f64());
    let frame_aspect = fw / fh;

    Some(if image_aspect > frame_aspect {
        Size::new(fh * image_aspect, fh)
    } else {
        Size::new(fw, fw / image_aspect)
    })
}

/// Frame-space rectangle the background image is drawn into for `transform`.
pub fn cover_draw_rect(
    image_aspect: f64,
    frame: FrameSize,
    transform: ImageTransform,
) -> Option<Rect> {
    let base = cover_base_size(image_aspect, frame)?;
    let s = transform.scale;
    let scaled = Size::new(base.width * s, base.height * s);
    let c = frame.center();
    let origin = Point::new(
        c.x - scaled.width / 2.0 + transform.x * s,
        c.y - scaled.height / 2.0 + transform.y * s,
    );
    Some(Rect::from_origin_size(origin, scaled))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/cover.rs"]
mod tests;
