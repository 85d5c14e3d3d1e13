use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameSize, Point};
use crate::foundation::math::clamp_symmetric;
use crate::transform::cover::cover_base_size;

/// Smallest zoom factor; at 1 the image exactly covers the frame on its tighter axis.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Background pan/zoom. `x`/`y` are in pre-scale image units, measured from the centred position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    /// Horizontal pan; positive moves the image right.
    pub x: f64,
    /// Vertical pan; positive moves the image down.
    pub y: f64,
    /// Zoom factor in `[MIN_ZOOM, MAX_ZOOM]`.
    pub scale: f64,
}

impl ImageTransform {
    /// Centred, unzoomed.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn clamp_zoom(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_ZOOM;
    }
    scale.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Clamp `t` so the scaled, panned image still covers `frame`.
///
/// Without an image (or with degenerate geometry) the identity transform is returned.
pub fn clamp_transform(
    t: ImageTransform,
    image_aspect: Option<f64>,
    frame: FrameSize,
) -> ImageTransform {
    let Some(base) = image_aspect.and_then(|a| cover_base_size(a, frame)) else {
        return ImageTransform::IDENTITY;
    };
    let scale = clamp_zoom(t.scale);
    let max_x = ((base.width * scale - frame.width_f64()) / 2.0 / scale).max(0.0);
    let max_y = ((base.height * scale - frame.height_f64()) / 2.0 / scale).max(0.0);

    ImageTransform {
        x: clamp_symmetric(t.x, max_x),
        y: clamp_symmetric(t.y, max_y),
        scale,
    }
}

/// Sole owner of the background [`ImageTransform`].
///
/// Every operation reads the committed transform, computes a replacement, clamps it, and commits
/// it before returning, so calls apply in the order they are made.
#[derive(Clone, Debug)]
pub struct TransformController {
    frame: FrameSize,
    image_aspect: Option<f64>,
    current: ImageTransform,
}

impl TransformController {
    /// Controller for `frame` with no background image and the identity transform.
    pub fn new(frame: FrameSize) -> Self {
        Self {
            frame,
            image_aspect: None,
            current: ImageTransform::IDENTITY,
        }
    }

    /// Last committed transform.
    pub fn current(&self) -> ImageTransform {
        self.current
    }

    /// Frame the transform is clamped against.
    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// Whether a background with a usable aspect ratio is set.
    pub fn has_image(&self) -> bool {
        self.image_aspect.is_some()
    }

    /// New frame geometry; old clamps no longer apply, so the transform resets.
    pub fn set_frame(&mut self, frame: FrameSize) {
        self.frame = frame;
        self.reset();
    }

    /// New background image (`None` when removed); the transform resets.
    pub fn set_image(&mut self, image_aspect: Option<f64>) {
        self.image_aspect = image_aspect.filter(|a| a.is_finite() && *a > 0.0);
        self.reset();
    }

    /// Commit the identity transform.
    pub fn reset(&mut self) {
        self.commit(ImageTransform::IDENTITY);
    }

    /// Restore a stored transform (e.g. from a saved document), clamped to the current image.
    pub fn restore(&mut self, t: ImageTransform) -> ImageTransform {
        let t = self.clamp(t);
        self.commit(t)
    }

    /// Clamp `t` against the current image and frame without committing it.
    pub fn clamp(&self, t: ImageTransform) -> ImageTransform {
        clamp_transform(t, self.image_aspect, self.frame)
    }

    /// Pan by a frame-space delta. The delta is divided by the current scale, so the image
    /// follows the pointer at any zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) -> ImageTransform {
        let cur = self.current;
        let next = self.clamp(ImageTransform {
            x: cur.x + dx / cur.scale,
            y: cur.y + dy / cur.scale,
            scale: cur.scale,
        });
        self.commit(next)
    }

    /// Multiply the zoom by `factor`, keeping the content under `pivot` (frame space) in place.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> ImageTransform {
        if !factor.is_finite() || factor <= 0.0 {
            return self.current;
        }
        let cur = self.current;
        let scale = clamp_zoom(cur.scale * factor);
        let f = scale / cur.scale;
        let offset = pivot - self.frame.center();

        let pan_x = cur.x * cur.scale * f - offset.x * (f - 1.0);
        let pan_y = cur.y * cur.scale * f - offset.y * (f - 1.0);
        let next = self.clamp(ImageTransform {
            x: pan_x / scale,
            y: pan_y / scale,
            scale,
        });
        self.commit(next)
    }

    fn commit(&mut self, next: ImageTransform) -> ImageTransform {
        if next != self.current {
            tracing::debug!(x = next.x, y = next.y, scale = next.scale, "transform committed");
        }
        self.current = next;
        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/controller.rs"]
mod tests;
