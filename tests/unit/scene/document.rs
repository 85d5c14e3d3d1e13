use super::*;
use crate::scene::model::{GridPosition, TextAlign};

#[test]
fn empty_object_uses_application_defaults() {
    let doc = RenderDocument::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(doc, RenderDocument::default());
    assert_eq!(doc.frame(), FrameSize::new(1080, 1080));
    assert!(doc.validate().is_ok());
}

#[test]
fn camel_case_fields_parse() {
    let json = r##"{
        "quote": "Great work @nasa",
        "aspectRatio": "16:9",
        "visualTheme": "Cyberpunk",
        "style": {"fontSize": 48, "textAlign": "right", "position": "bottomLeft", "fontColor": "#FFCC00"},
        "watermark": {"position": "center", "opacity": 0.4},
        "transform": {"x": 12.5, "y": -3.0, "scale": 1.5},
        "background": "bg.png"
    }"##;
    let doc = RenderDocument::from_reader(json.as_bytes()).unwrap();
    assert_eq!(doc.aspect_ratio, AspectRatio::LANDSCAPE);
    assert_eq!(doc.frame(), FrameSize::new(1080, 608));
    assert_eq!(doc.style.font_size, 48);
    assert_eq!(doc.style.text_align, TextAlign::Right);
    assert_eq!(doc.style.position, GridPosition::BottomLeft);
    assert_eq!(doc.watermark.position, GridPosition::Center);
    assert!(doc.watermark.enabled);
    assert_eq!(doc.transform.scale, 1.5);
    assert_eq!(doc.visual_theme.as_deref(), Some("Cyberpunk"));
    // Loaded from a reader: paths stay as written.
    assert_eq!(doc.background_path(), Some(PathBuf::from("bg.png")));
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(RenderDocument::from_reader(r#"{"qoute": "x"}"#.as_bytes()).is_err());
    assert!(RenderDocument::from_reader(r#"{"aspectRatio": "wide"}"#.as_bytes()).is_err());
    assert!(
        RenderDocument::from_reader(r#"{"style": {"fontColor": "red"}}"#.as_bytes()).is_err()
    );

    let doc =
        RenderDocument::from_reader(r#"{"watermark": {"size": 0}}"#.as_bytes()).unwrap();
    assert!(doc.validate().is_err());
}

#[test]
fn from_path_resolves_relative_assets() {
    let dir = std::env::temp_dir().join(format!("quotegenx_doc_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("card.json");
    std::fs::write(
        &path,
        r#"{"background": "img/bg.png", "watermarkImage": "/abs/logo.png", "fonts": "fonts"}"#,
    )
    .unwrap();

    let doc = RenderDocument::from_path(&path).unwrap();
    assert_eq!(doc.base_dir(), Some(dir.as_path()));
    assert_eq!(doc.background_path(), Some(dir.join("img/bg.png")));
    assert_eq!(doc.watermark_path(), Some(PathBuf::from("/abs/logo.png")));
    assert_eq!(doc.font_dir(), Some(dir.join("fonts")));

    std::fs::remove_dir_all(&dir).unwrap();
    assert!(RenderDocument::from_path(&path).is_err());
}
