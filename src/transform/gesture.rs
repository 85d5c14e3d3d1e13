use crate::foundation::core::{Point, Vec2};
use crate::transform::controller::{ImageTransform, TransformController};

/// Zoom step of the zoom-in/zoom-out buttons.
pub const BUTTON_ZOOM_STEP: f64 = 1.25;
/// Zoom change per wheel delta unit while the zoom modifier is held.
pub const WHEEL_ZOOM_PER_UNIT: f64 = 0.01;
/// Lower bound for a single wheel zoom factor; large deltas would otherwise go non-positive.
pub const MIN_WHEEL_FACTOR: f64 = 0.1;

/// Maps display coordinates (the on-screen preview) to frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Display position of the frame's top-left corner.
    pub origin: Point,
    /// Display pixels per frame pixel.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Preview of `frame_width` pixels shown `display_width` pixels wide at `origin`.
    pub fn fitted(origin: Point, display_width: f64, frame_width: f64) -> Self {
        let scale = if display_width > 0.0 && frame_width > 0.0 {
            display_width / frame_width
        } else {
            1.0
        };
        Self { origin, scale }
    }

    pub fn to_frame(&self, p: Point) -> Point {
        ((p - self.origin) / self.scale).to_point()
    }

    pub fn delta_to_frame(&self, v: Vec2) -> Vec2 {
        v / self.scale
    }
}

/// Raw input events from the preview surface, in display coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    PointerDown { pos: Point },
    PointerMove { pos: Point },
    PointerUp,
    PointerLeave,
    Wheel {
        pos: Point,
        delta: Vec2,
        zoom_modifier: bool,
    },
    /// `touches` holds every active touch after the change.
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { touches: Vec<Point> },
    TouchCancel,
    ZoomIn,
    ZoomOut,
}

/// Host side of pointer capture (window-level listeners, OS pointer grab, ...).
pub trait CaptureHost {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// Host that has nothing to capture.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl CaptureHost for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Held input capture; released when dropped.
#[derive(Debug)]
pub struct CaptureGuard<H: CaptureHost> {
    host: H,
}

impl<H: CaptureHost> CaptureGuard<H> {
    pub fn acquire(mut host: H) -> Self {
        host.acquire();
        Self { host }
    }
}

impl<H: CaptureHost> Drop for CaptureGuard<H> {
    fn drop(&mut self) {
        self.host.release();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Active {
    Idle,
    Drag { last: Point },
    Pinch { last_distance: f64 },
}

/// Turns [`GestureEvent`]s into [`TransformController`] calls.
///
/// Capture is held from the start of a drag or pinch until it ends, and is also released if the
/// mapper is dropped mid-gesture.
#[derive(Debug)]
pub struct GestureMapper<H: CaptureHost + Clone = NoCapture> {
    host: H,
    viewport: Viewport,
    active: Active,
    capture: Option<CaptureGuard<H>>,
}

impl Default for GestureMapper<NoCapture> {
    fn default() -> Self {
        Self::new(NoCapture)
    }
}

impl<H: CaptureHost + Clone> GestureMapper<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            viewport: Viewport::default(),
            active: Active::Idle,
            capture: None,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Apply one event. Returns the committed transform when the controller was driven.
    pub fn handle(
        &mut self,
        controller: &mut TransformController,
        event: &GestureEvent,
    ) -> Option<ImageTransform> {
        match event {
            GestureEvent::PointerDown { pos } => {
                self.begin_drag(controller, *pos);
                None
            }
            GestureEvent::PointerMove { pos } => self.drag_to(controller, *pos),
            GestureEvent::PointerUp | GestureEvent::PointerLeave | GestureEvent::TouchCancel => {
                self.end();
                None
            }
            GestureEvent::Wheel {
                pos,
                delta,
                zoom_modifier,
            } => {
                if *zoom_modifier {
                    let factor = (1.0 - delta.y * WHEEL_ZOOM_PER_UNIT).max(MIN_WHEEL_FACTOR);
                    Some(controller.zoom(factor, self.viewport.to_frame(*pos)))
                } else {
                    let d = self.viewport.delta_to_frame(*delta);
                    Some(controller.pan(-d.x, -d.y))
                }
            }
            GestureEvent::TouchStart { touches } => {
                match touches.as_slice() {
                    [one] => self.begin_drag(controller, *one),
                    [a, b] => self.begin_pinch(*a, *b),
                    _ => {}
                }
                None
            }
            GestureEvent::TouchMove { touches } => match touches.as_slice() {
                [one] => self.drag_to(controller, *one),
                [a, b] => self.pinch_to(controller, *a, *b),
                _ => None,
            },
            GestureEvent::TouchEnd { touches } => {
                match touches.as_slice() {
                    [one] => self.begin_drag(controller, *one),
                    _ => self.end(),
                }
                None
            }
            GestureEvent::ZoomIn => {
                Some(controller.zoom(BUTTON_ZOOM_STEP, controller.frame().center()))
            }
            GestureEvent::ZoomOut => {
                Some(controller.zoom(1.0 / BUTTON_ZOOM_STEP, controller.frame().center()))
            }
        }
    }

    fn begin_drag(&mut self, controller: &TransformController, pos: Point) {
        if !controller.has_image() {
            self.end();
            return;
        }
        self.active = Active::Drag {
            last: self.viewport.to_frame(pos),
        };
        self.hold_capture();
    }

    fn drag_to(&mut self, controller: &mut TransformController, pos: Point) -> Option<ImageTransform> {
        let Active::Drag { last } = self.active else {
            return None;
        };
        let p = self.viewport.to_frame(pos);
        self.active = Active::Drag { last: p };
        let d = p - last;
        Some(controller.pan(d.x, d.y))
    }

    fn begin_pinch(&mut self, a: Point, b: Point) {
        self.active = Active::Pinch {
            last_distance: self.frame_distance(a, b),
        };
        self.hold_capture();
    }

    fn pinch_to(
        &mut self,
        controller: &mut TransformController,
        a: Point,
        b: Point,
    ) -> Option<ImageTransform> {
        let distance = self.frame_distance(a, b);
        let Active::Pinch { last_distance } = self.active else {
            self.begin_pinch(a, b);
            return None;
        };
        self.active = Active::Pinch {
            last_distance: distance,
        };
        if last_distance <= f64::EPSILON || distance <= f64::EPSILON {
            return None;
        }
        let mid = self.viewport.to_frame(a.midpoint(b));
        Some(controller.zoom(distance / last_distance, mid))
    }

    fn frame_distance(&self, a: Point, b: Point) -> f64 {
        self.viewport.to_frame(a).distance(self.viewport.to_frame(b))
    }

    fn hold_capture(&mut self) {
        if self.capture.is_none() {
            self.capture = Some(CaptureGuard::acquire(self.host.clone()));
        }
    }

    fn end(&mut self) {
        self.active = Active::Idle;
        self.capture = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/gesture.rs"]
mod tests;
