use super::*;
use serde_json::json;

#[test]
fn style_defaults_match_initial_editor_state() {
    let s = StyleOptions::default();
    assert_eq!(s.font_size, 64);
    assert_eq!(s.position, GridPosition::Center);
    assert_eq!(s.text_align, TextAlign::Center);
    assert_eq!(s.text_background_padding, 24.0);
    assert!(s.validate().is_ok());

    let w = WatermarkOptions::default();
    assert!(w.enabled);
    assert_eq!(w.position, GridPosition::BottomRight);
    assert!(w.validate().is_ok());
}

#[test]
fn style_deserializes_camel_case_with_defaults() {
    let s: StyleOptions = serde_json::from_value(json!({
        "fontFamily": "'Oswald', sans-serif",
        "fontSize": 48,
        "fontColor": "#ffcc00",
        "position": "bottomLeft",
        "textAlign": "right",
        "textOutlineEnabled": true
    }))
    .unwrap();
    assert_eq!(s.font_size, 48);
    assert_eq!(s.position, GridPosition::BottomLeft);
    assert_eq!(s.text_align, TextAlign::Right);
    assert!(s.outline_active());
    assert_eq!(s.text_outline_width, 4.0);
    assert_eq!(s.font_weight, "400");
}

#[test]
fn bold_and_italic_override_weight_token() {
    let mut s = StyleOptions {
        font_weight: "300".to_string(),
        ..StyleOptions::default()
    };
    assert_eq!(s.main_font().weight, 300);

    s.is_bold = true;
    s.is_italic = true;
    let f = s.main_font();
    assert_eq!(f.weight, BOLD_WEIGHT);
    assert!(f.italic);

    s.is_bold = false;
    s.font_weight = "heavy".to_string();
    assert_eq!(s.effective_weight(), REGULAR_WEIGHT);
}

#[test]
fn grid_positions_split_into_bands() {
    assert_eq!(GridPosition::TopRight.vertical(), Band::Start);
    assert_eq!(GridPosition::TopRight.horizontal(), Band::End);
    assert_eq!(GridPosition::Center.vertical(), Band::Center);
    assert_eq!(GridPosition::Center.horizontal(), Band::Center);
    assert_eq!(GridPosition::BottomLeft.vertical(), Band::End);
    assert_eq!(GridPosition::BottomLeft.horizontal(), Band::Start);

    let p: GridPosition = serde_json::from_value(json!("centerRight")).unwrap();
    assert_eq!(p, GridPosition::CenterRight);
}

#[test]
fn validation_rejects_out_of_range_values() {
    let s = StyleOptions {
        text_background_opacity: 1.5,
        ..StyleOptions::default()
    };
    assert!(s.validate().is_err());

    let s = StyleOptions {
        text_outline_width: -1.0,
        ..StyleOptions::default()
    };
    assert!(s.validate().is_err());

    let w = WatermarkOptions {
        size: 0.0,
        ..WatermarkOptions::default()
    };
    assert!(w.validate().is_err());
}
