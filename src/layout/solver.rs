use crate::{
    foundation::core::{FrameSize, Rect},
    layout::wrap::wrap_words,
    quote::attribution::ParsedQuote,
    scene::model::{Band, GridPosition, StyleOptions, TextAlign},
    text::measure::{FontSpec, TextMeasure},
};

/// Share of the frame width kept clear on each side of the text column.
pub const MARGIN_RATIO: f64 = 0.08;
pub const LINE_HEIGHT_RATIO: f64 = 1.2;
pub const ATTRIBUTION_SIZE_RATIO: f64 = 0.6;
pub const ATTRIBUTION_LINE_HEIGHT_RATIO: f64 = 1.4;

/// Horizontal span available to the text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Column {
    pub x: f64,
    pub width: f64,
}

impl Column {
    /// Draw-x for `align`: the column's left edge, middle, or right edge.
    pub fn anchor(self, align: TextAlign) -> f64 {
        match align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x + self.width / 2.0,
            TextAlign::Right => self.x + self.width,
        }
    }
}

pub fn margin_for(frame: FrameSize) -> f64 {
    frame.width_f64() * MARGIN_RATIO
}

/// Left/right cells get half the frame; every other cell spans the full width.
pub fn column_for(position: GridPosition, frame: FrameSize) -> Column {
    let width = frame.width_f64();
    let margin = margin_for(frame);
    match position.horizontal() {
        Band::Start => Column {
            x: margin,
            width: width / 2.0 - margin * 1.5,
        },
        Band::End => Column {
            x: width / 2.0 + margin * 0.5,
            width: width / 2.0 - margin * 1.5,
        },
        Band::Center => Column {
            x: margin,
            width: width - margin * 2.0,
        },
    }
}

/// Left edge of a run of `width` pixels anchored at `anchor_x`.
pub fn aligned_left(anchor_x: f64, width: f64, align: TextAlign) -> f64 {
    match align {
        TextAlign::Left => anchor_x,
        TextAlign::Center => anchor_x - width / 2.0,
        TextAlign::Right => anchor_x - width,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    /// Trimmed text as drawn.
    pub text: String,
    /// Measured width of `text`.
    pub width: f64,
    pub baseline_y: f64,
}

/// Rounded rectangle painted behind the text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundBox {
    pub rect: Rect,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteLayout {
    pub align: TextAlign,
    pub column: Column,
    /// Horizontal anchor every line is aligned against.
    pub anchor_x: f64,
    /// Top of the text block.
    pub block_y: f64,
    pub main_font: FontSpec,
    pub main_line_height: f64,
    pub lines: Vec<LayoutLine>,
    pub max_line_width: f64,
    pub attribution: Option<LayoutLine>,
    pub attribution_font: FontSpec,
    /// Zero when there is no attribution.
    pub attribution_line_height: f64,
    pub total_height: f64,
    /// Present only when the style enables a text background.
    pub background: Option<BackgroundBox>,
}

impl QuoteLayout {
    /// Left edge of a drawn run of `width` pixels.
    pub fn left_for(&self, width: f64) -> f64 {
        aligned_left(self.anchor_x, width, self.align)
    }

    pub fn main_block_height(&self) -> f64 {
        self.lines.len() as f64 * self.main_line_height
    }
}

/// Lay out a parsed quote inside `frame`. Returns `None` for an empty quote.
#[tracing::instrument(skip(quote, style, measure), fields(lines))]
pub fn layout_quote<M: TextMeasure + ?Sized>(
    quote: &ParsedQuote,
    style: &StyleOptions,
    frame: FrameSize,
    measure: &mut M,
) -> Option<QuoteLayout> {
    if quote.is_empty() {
        return None;
    }

    let margin = margin_for(frame);
    let column = column_for(style.position, frame);
    let main_font = style.main_font();
    let font_size = f64::from(main_font.size_px);

    let texts = wrap_words(&quote.main_quote, &main_font, column.width, measure);
    tracing::Span::current().record("lines", texts.len());

    let main_line_height = font_size * LINE_HEIGHT_RATIO;
    let attribution_size = font_size * ATTRIBUTION_SIZE_RATIO;
    let attribution_font = main_font.with_size(attribution_size as f32);
    let attribution_line_height = if quote.has_attribution() {
        attribution_size * ATTRIBUTION_LINE_HEIGHT_RATIO
    } else {
        0.0
    };
    let main_height = texts.len() as f64 * main_line_height;
    let total_height = main_height + attribution_line_height;

    let block_y = match style.position.vertical() {
        Band::Start => margin,
        Band::Center => frame.height_f64() / 2.0 - total_height / 2.0,
        Band::End => frame.height_f64() - total_height - margin,
    };
    let anchor_x = column.anchor(style.text_align);

    let first_baseline = block_y + font_size;
    let lines: Vec<LayoutLine> = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| LayoutLine {
            width: measure.measure(&main_font, &text),
            baseline_y: first_baseline + i as f64 * main_line_height,
            text,
        })
        .collect();
    let max_line_width = lines.iter().map(|l| l.width).fold(0.0, f64::max);

    let attribution = quote.has_attribution().then(|| LayoutLine {
        width: measure.measure(&attribution_font, &quote.attribution),
        baseline_y: first_baseline + main_height - (main_line_height - font_size)
            + attribution_size,
        text: quote.attribution.clone(),
    });

    let background = style.text_background_enabled.then(|| {
        let padding = style.text_background_padding.max(0.0);
        let left = aligned_left(anchor_x, max_line_width, style.text_align);
        BackgroundBox {
            rect: Rect::new(
                left - padding,
                block_y - padding,
                left + max_line_width + padding,
                block_y + total_height + padding,
            ),
            radius: style.text_background_border_radius.max(0.0),
        }
    });

    Some(QuoteLayout {
        align: style.text_align,
        column,
        anchor_x,
        block_y,
        main_font,
        main_line_height,
        lines,
        max_line_width,
        attribution,
        attribution_font,
        attribution_line_height,
        total_height,
        background,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
