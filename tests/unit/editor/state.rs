use super::*;

#[test]
fn default_state_matches_first_launch() {
    let s = EditorState::default();
    assert_eq!(s.quote, DEFAULT_QUOTE);
    assert_eq!(s.aspect_ratio, AspectRatio::SQUARE);
    assert_eq!(s.style, StyleOptions::default());
    assert!(s.visual_theme.is_none());
}

#[test]
fn reduce_returns_new_state_and_leaves_input_alone() {
    let before = EditorState::default();
    let after = reduce(&before, Command::Style(StyleCommand::Bold(true)));
    assert!(!before.style.is_bold);
    assert!(after.style.is_bold);
    assert_eq!(after.style.effective_weight(), 700);
    assert_eq!(after.quote, before.quote);
}

#[test]
fn each_field_group_is_routed() {
    let s = EditorState::default();
    let s = reduce(&s, Command::Quote("Great work @nasa".to_string()));
    let s = reduce(&s, Command::Style(StyleCommand::Position(GridPosition::TopRight)));
    let s = reduce(&s, Command::Watermark(WatermarkCommand::Enabled(false)));
    let s = reduce(&s, Command::AspectRatio(AspectRatio::STORY));
    let s = reduce(&s, Command::Theme(Some("Vaporwave".to_string())));

    assert_eq!(s.quote, "Great work @nasa");
    assert_eq!(s.style.position, GridPosition::TopRight);
    assert!(!s.watermark.enabled);
    assert_eq!(s.aspect_ratio, AspectRatio::STORY);
    assert_eq!(s.visual_theme.as_deref(), Some("Vaporwave"));

    assert_eq!(reduce(&s, Command::Reset), EditorState::default());
}

#[test]
fn numeric_edits_are_clamped() {
    let s = EditorState::default();
    let s = reduce(&s, Command::Style(StyleCommand::BackgroundOpacity(1.7)));
    let s = reduce(&s, Command::Style(StyleCommand::OutlineWidth(-3.0)));
    let s = reduce(&s, Command::Style(StyleCommand::FontSize(0)));
    let s = reduce(&s, Command::Watermark(WatermarkCommand::Size(250.0)));
    let s = reduce(&s, Command::Watermark(WatermarkCommand::Opacity(f64::NAN)));

    assert_eq!(s.style.text_background_opacity, 1.0);
    assert_eq!(s.style.text_outline_width, 0.0);
    assert_eq!(s.style.font_size, 1);
    assert_eq!(s.watermark.size, 100.0);
    assert_eq!(s.watermark.opacity, 0.7);
    assert!(s.style.validate().is_ok());
    assert!(s.watermark.validate().is_ok());
}

#[test]
fn replace_swaps_whole_style() {
    let preset = StyleOptions {
        font_family: "'Lora', serif".to_string(),
        is_italic: true,
        ..StyleOptions::default()
    };
    let s = reduce(
        &EditorState::default(),
        Command::Style(StyleCommand::Replace(preset.clone())),
    );
    assert_eq!(s.style, preset);
}
