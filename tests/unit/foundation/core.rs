use super::*;

#[test]
fn aspect_ratio_parses_and_prints() {
    let ar: AspectRatio = "9:16".parse().unwrap();
    assert_eq!(ar, AspectRatio::STORY);
    assert_eq!(ar.to_string(), "9:16");
    assert_eq!(ar.slug(), "9x16");

    assert!("0:1".parse::<AspectRatio>().is_err());
    assert!("16/9".parse::<AspectRatio>().is_err());
    assert!("a:b".parse::<AspectRatio>().is_err());
}

#[test]
fn aspect_ratio_serde_uses_string_form() {
    let ar: AspectRatio = serde_json::from_str("\"4:5\"").unwrap();
    assert_eq!(ar, AspectRatio::PORTRAIT);
    assert_eq!(serde_json::to_string(&ar).unwrap(), "\"4:5\"");
    assert!(serde_json::from_str::<AspectRatio>("\"4-5\"").is_err());
}

#[test]
fn frame_size_follows_baseline_width() {
    assert_eq!(
        FrameSize::for_aspect(AspectRatio::SQUARE),
        FrameSize::new(1080, 1080)
    );
    assert_eq!(
        FrameSize::for_aspect(AspectRatio::PORTRAIT),
        FrameSize::new(1080, 1350)
    );
    assert_eq!(
        FrameSize::for_aspect(AspectRatio::STORY),
        FrameSize::new(1080, 1920)
    );
    // 1080 * 9 / 16 = 607.5 rounds up.
    assert_eq!(
        FrameSize::for_aspect(AspectRatio::LANDSCAPE),
        FrameSize::new(1080, 608)
    );
}

#[test]
fn with_opacity_scales_existing_alpha() {
    assert_eq!(Rgba8::WHITE.with_opacity(0.5).a, 128);
    let half = Rgba8 { a: 128, ..Rgba8::BLACK };
    assert_eq!(half.with_opacity(0.5).a, 64);
    assert_eq!(Rgba8::WHITE.with_opacity(2.0).a, 255);
}
