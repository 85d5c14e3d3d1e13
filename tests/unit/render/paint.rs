use super::*;
use crate::assets::color::HexColor;

#[test]
fn outline_only_when_enabled_and_wide() {
    let mut style = StyleOptions::default();
    assert_eq!(PaintStyle::main_text(&style).outline, None);

    style.text_outline_enabled = true;
    style.text_outline_width = 0.0;
    assert_eq!(PaintStyle::main_text(&style).outline, None);

    style.text_outline_width = 5.0;
    let main = PaintStyle::main_text(&style);
    assert_eq!(main.fill, Rgba8::WHITE);
    assert_eq!(
        main.outline,
        Some(Outline {
            color: Rgba8::BLACK,
            width: 5.0
        })
    );
}

#[test]
fn attribution_outline_is_scaled_with_floor() {
    let mut style = StyleOptions {
        text_outline_enabled: true,
        text_outline_width: 5.0,
        ..StyleOptions::default()
    };
    assert_eq!(PaintStyle::attribution_text(&style).outline.unwrap().width, 3.0);

    style.text_outline_width = 1.0;
    assert_eq!(PaintStyle::attribution_text(&style).outline.unwrap().width, 1.0);
}

#[test]
fn background_alpha_comes_from_opacity() {
    let style = StyleOptions {
        text_background_color: HexColor(Rgba8::opaque(10, 20, 30)),
        text_background_opacity: 0.5,
        ..StyleOptions::default()
    };
    let paint = PaintStyle::text_background(&style);
    assert_eq!(paint.fill, Rgba8 { r: 10, g: 20, b: 30, a: 128 });
    assert!(!paint.is_translucent());
}

#[test]
fn image_paint_clamps_opacity() {
    assert_eq!(PaintStyle::image(1.5).opacity, 1.0);
    assert!(PaintStyle::image(0.7).is_translucent());
}
