use super::*;
use crate::transform::cover::cover_draw_rect;

const SQUARE: FrameSize = FrameSize {
    width: 1080,
    height: 1080,
};

fn with_wide_image() -> TransformController {
    let mut c = TransformController::new(SQUARE);
    c.set_image(Some(2.0));
    c
}

fn covers_frame(aspect: f64, frame: FrameSize, t: ImageTransform) -> bool {
    let r = cover_draw_rect(aspect, frame, t).unwrap();
    let eps = 1e-6;
    r.x0 <= eps
        && r.y0 <= eps
        && r.x1 >= frame.width_f64() - eps
        && r.y1 >= frame.height_f64() - eps
}

#[test]
fn clamped_transform_always_covers_frame() {
    let frames = [SQUARE, FrameSize::new(1080, 1350), FrameSize::new(1080, 608)];
    for frame in frames {
        for aspect in [0.5, 1.0, 1.5, 2.0] {
            for step in 0..=8 {
                let scale = 1.0 + f64::from(step) * 0.5;
                for (x, y) in [(0.0, 0.0), (5000.0, -5000.0), (-123.0, 77.0), (1e9, 1e9)] {
                    let t = clamp_transform(ImageTransform { x, y, scale }, Some(aspect), frame);
                    assert!(
                        covers_frame(aspect, frame, t),
                        "{frame:?} aspect={aspect} {t:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn clamp_limits_zoom_range() {
    let t = clamp_transform(
        ImageTransform {
            x: 0.0,
            y: 0.0,
            scale: 9.0,
        },
        Some(1.0),
        SQUARE,
    );
    assert_eq!(t.scale, MAX_ZOOM);
    let t = clamp_transform(
        ImageTransform {
            x: 0.0,
            y: 0.0,
            scale: 0.2,
        },
        Some(1.0),
        SQUARE,
    );
    assert_eq!(t.scale, MIN_ZOOM);
}

#[test]
fn degenerate_geometry_yields_identity() {
    let t = ImageTransform {
        x: 30.0,
        y: 30.0,
        scale: 3.0,
    };
    assert_eq!(clamp_transform(t, None, SQUARE), ImageTransform::IDENTITY);
    assert_eq!(
        clamp_transform(t, Some(1.5), FrameSize::new(0, 1080)),
        ImageTransform::IDENTITY
    );
    assert_eq!(clamp_transform(t, Some(0.0), SQUARE), ImageTransform::IDENTITY);
}

#[test]
fn pan_divides_by_scale_and_clamps() {
    let mut c = with_wide_image();
    let t = c.pan(100.0, 100.0);
    assert_eq!((t.x, t.y, t.scale), (100.0, 0.0, 1.0));

    let t = c.pan(10_000.0, 0.0);
    assert_eq!(t.x, 540.0);

    c.zoom(2.0, SQUARE.center());
    let before = c.current();
    let t = c.pan(-100.0, 40.0);
    assert!((t.x - (before.x - 50.0)).abs() < 1e-9);
    assert!((t.y - (before.y + 20.0)).abs() < 1e-9);
}

#[test]
fn zoom_keeps_pivot_content_in_place() {
    let pivot = Point::new(640.0, 490.0);
    let c0 = SQUARE.center();

    for factor in [0.5, 0.75, 1.0, 1.25, 1.5, 2.0] {
        let mut c = with_wide_image();
        c.restore(ImageTransform {
            x: 20.0,
            y: 10.0,
            scale: 2.5,
        });
        let before = c.current();
        // Image-space point under the pivot, relative to the image centre.
        let qx = (pivot.x - c0.x) / before.scale - before.x;
        let qy = (pivot.y - c0.y) / before.scale - before.y;

        let after = c.zoom(factor, pivot);
        let sx = c0.x + (after.x + qx) * after.scale;
        let sy = c0.y + (after.y + qy) * after.scale;
        assert!((sx - pivot.x).abs() < 1.0, "factor {factor}: x {sx}");
        assert!((sy - pivot.y).abs() < 1.0, "factor {factor}: y {sy}");
        assert!((after.scale - before.scale * factor).abs() < 1e-9);
    }
}

#[test]
fn zoom_at_limits_is_stable() {
    let mut c = with_wide_image();
    assert_eq!(c.zoom(0.5, Point::new(10.0, 10.0)), ImageTransform::IDENTITY);
    for _ in 0..20 {
        c.zoom(1.25, SQUARE.center());
    }
    assert_eq!(c.current().scale, MAX_ZOOM);
    assert_eq!(c.zoom(f64::NAN, SQUARE.center()).scale, MAX_ZOOM);
    assert_eq!(c.zoom(-1.0, SQUARE.center()).scale, MAX_ZOOM);
}

#[test]
fn frame_and_image_changes_reset() {
    let mut c = with_wide_image();
    c.zoom(2.0, Point::new(100.0, 100.0));
    assert_ne!(c.current(), ImageTransform::IDENTITY);
    c.set_frame(FrameSize::new(1080, 1920));
    assert_eq!(c.current(), ImageTransform::IDENTITY);

    c.zoom(2.0, Point::new(100.0, 100.0));
    c.set_image(Some(0.75));
    assert_eq!(c.current(), ImageTransform::IDENTITY);
}

#[test]
fn without_image_everything_is_identity() {
    let mut c = TransformController::new(SQUARE);
    assert!(!c.has_image());
    assert_eq!(c.pan(50.0, 50.0), ImageTransform::IDENTITY);
    assert_eq!(c.zoom(2.0, SQUARE.center()), ImageTransform::IDENTITY);
}

#[test]
fn transform_serde_uses_defaults() {
    let t: ImageTransform = serde_json::from_str(r#"{"x": 4.0}"#).unwrap();
    assert_eq!(
        t,
        ImageTransform {
            x: 4.0,
            y: 0.0,
            scale: 1.0
        }
    );
}
