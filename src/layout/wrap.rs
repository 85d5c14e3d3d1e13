use crate::text::measure::{FontSpec, TextMeasure};

/// Greedy word wrap.
///
/// Words are accumulated with a trailing space; once the accumulated text measures wider than
/// `max_width` and the line already holds a word, the line is closed and the overflowing word
/// opens the next one. A single word wider than `max_width` is never split. Returned lines are
/// trimmed.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    text: &str,
    font: &FontSpec,
    max_width: f64,
    measure: &mut M,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{current}{word} ");
        if !current.is_empty() && measure.measure(font, &candidate) > max_width {
            lines.push(current.trim_end().to_string());
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
