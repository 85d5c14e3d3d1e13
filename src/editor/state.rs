use serde::{Deserialize, Serialize};

use crate::assets::color::HexColor;
use crate::foundation::core::AspectRatio;
use crate::scene::model::{GridPosition, StyleOptions, TextAlign, WatermarkOptions};

pub const DEFAULT_QUOTE: &str = "The journey of a thousand miles begins with a single step.";

/// User choices that drive a render. Replaced wholesale by [`reduce`]; never edited in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    pub quote: String,
    pub style: StyleOptions,
    pub watermark: WatermarkOptions,
    pub aspect_ratio: AspectRatio,
    pub visual_theme: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            quote: DEFAULT_QUOTE.to_string(),
            style: StyleOptions::default(),
            watermark: WatermarkOptions::default(),
            aspect_ratio: AspectRatio::SQUARE,
            visual_theme: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StyleCommand {
    FontFamily(String),
    FontSize(u32),
    FontColor(HexColor),
    FontWeight(String),
    Bold(bool),
    Italic(bool),
    Position(GridPosition),
    TextAlign(TextAlign),
    OutlineEnabled(bool),
    OutlineColor(HexColor),
    OutlineWidth(f64),
    BackgroundEnabled(bool),
    BackgroundColor(HexColor),
    BackgroundOpacity(f64),
    BackgroundPadding(f64),
    BackgroundRadius(f64),
    /// Load a whole style at once (presets, saved cards).
    Replace(StyleOptions),
}

#[derive(Clone, Debug, PartialEq)]
pub enum WatermarkCommand {
    Enabled(bool),
    Position(GridPosition),
    Opacity(f64),
    Size(f64),
}

/// One edit to the [`EditorState`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Quote(String),
    Style(StyleCommand),
    Watermark(WatermarkCommand),
    AspectRatio(AspectRatio),
    Theme(Option<String>),
    Reset,
}

/// Apply `cmd` to `state`, returning the next state.
///
/// Numeric inputs are clamped into their valid ranges; non-finite numbers leave the field as is.
pub fn reduce(state: &EditorState, cmd: Command) -> EditorState {
    let mut next = state.clone();
    match cmd {
        Command::Quote(q) => next.quote = q,
        Command::Style(c) => next.style = reduce_style(&state.style, c),
        Command::Watermark(c) => next.watermark = reduce_watermark(&state.watermark, c),
        Command::AspectRatio(a) => next.aspect_ratio = a,
        Command::Theme(t) => next.visual_theme = t,
        Command::Reset => return EditorState::default(),
    }
    next
}

fn reduce_style(style: &StyleOptions, cmd: StyleCommand) -> StyleOptions {
    let mut s = style.clone();
    match cmd {
        StyleCommand::FontFamily(f) => s.font_family = f,
        StyleCommand::FontSize(px) => s.font_size = px.max(1),
        StyleCommand::FontColor(c) => s.font_color = c,
        StyleCommand::FontWeight(w) => s.font_weight = w,
        StyleCommand::Bold(b) => s.is_bold = b,
        StyleCommand::Italic(i) => s.is_italic = i,
        StyleCommand::Position(p) => s.position = p,
        StyleCommand::TextAlign(a) => s.text_align = a,
        StyleCommand::OutlineEnabled(e) => s.text_outline_enabled = e,
        StyleCommand::OutlineColor(c) => s.text_outline_color = c,
        StyleCommand::OutlineWidth(w) => s.text_outline_width = non_negative(w, s.text_outline_width),
        StyleCommand::BackgroundEnabled(e) => s.text_background_enabled = e,
        StyleCommand::BackgroundColor(c) => s.text_background_color = c,
        StyleCommand::BackgroundOpacity(o) => {
            s.text_background_opacity = unit(o, s.text_background_opacity)
        }
        StyleCommand::BackgroundPadding(p) => {
            s.text_background_padding = non_negative(p, s.text_background_padding)
        }
        StyleCommand::BackgroundRadius(r) => {
            s.text_background_border_radius = non_negative(r, s.text_background_border_radius)
        }
        StyleCommand::Replace(all) => s = all,
    }
    s
}

fn reduce_watermark(wm: &WatermarkOptions, cmd: WatermarkCommand) -> WatermarkOptions {
    let mut w = wm.clone();
    match cmd {
        WatermarkCommand::Enabled(e) => w.enabled = e,
        WatermarkCommand::Position(p) => w.position = p,
        WatermarkCommand::Opacity(o) => w.opacity = unit(o, w.opacity),
        WatermarkCommand::Size(pct) => {
            if pct.is_finite() {
                w.size = pct.clamp(1.0, 100.0);
            }
        }
    }
    w
}

fn non_negative(v: f64, old: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { old }
}

fn unit(v: f64, old: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { old }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
