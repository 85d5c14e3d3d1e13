use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, FrameSize, Point, Rect, Rgba8};
use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::layout::solver::{BackgroundBox, QuoteLayout, layout_quote};
use crate::layout::watermark::watermark_rect;
use crate::quote::attribution::ParsedQuote;
use crate::render::backend::FrameRGBA;
use crate::render::paint::PaintStyle;
use crate::scene::model::{StyleOptions, WatermarkOptions};
use crate::text::engine::{ShapedLine, TextEngine};
use crate::text::fonts::ResolvedFace;
use crate::text::measure::FontSpec;
use crate::transform::controller::ImageTransform;
use crate::transform::cover::cover_draw_rect;

/// Everything one frame depends on. The compositor only reads it.
#[derive(Clone, Copy, Debug)]
pub struct RenderInput<'a> {
    pub frame: FrameSize,
    pub quote: &'a ParsedQuote,
    pub style: &'a StyleOptions,
    pub background: Option<&'a PreparedImage>,
    pub transform: ImageTransform,
    pub watermark: Option<&'a PreparedImage>,
    pub watermark_options: &'a WatermarkOptions,
}

#[derive(Clone)]
struct CachedPaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ImageRole {
    Background,
    Watermark,
}

/// CPU compositor powered by `vello_cpu`.
///
/// Keeps the render context, converted image paints, and font handles between frames; output
/// depends only on the [`RenderInput`] and the fonts registered in the [`TextEngine`].
#[derive(Default)]
pub struct CpuCompositor {
    ctx: Option<vello_cpu::RenderContext>,
    image_cache: HashMap<ImageRole, CachedPaint>,
    font_cache: HashMap<usize, vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for CpuCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCompositor")
            .field("cached_images", &self.image_cache.len())
            .field("cached_fonts", &self.font_cache.len())
            .finish_non_exhaustive()
    }
}

/// Render one frame with a throwaway compositor.
pub fn render_frame(input: &RenderInput<'_>, text: &mut TextEngine) -> QuotegenxResult<FrameRGBA> {
    CpuCompositor::new().render(input, text)
}

impl CpuCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw, in order: black fill, background, text box, quote lines, attribution, watermark.
    #[tracing::instrument(skip_all, fields(width = input.frame.width, height = input.frame.height))]
    pub fn render(
        &mut self,
        input: &RenderInput<'_>,
        text: &mut TextEngine,
    ) -> QuotegenxResult<FrameRGBA> {
        let frame = input.frame;
        let width: u16 = frame
            .width
            .try_into()
            .map_err(|_| QuotegenxError::render("frame width exceeds u16"))?;
        let height: u16 = frame
            .height
            .try_into()
            .map_err(|_| QuotegenxError::render("frame height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(QuotegenxError::render("frame must be non-empty"));
        }

        // Fonts are resolved before anything is measured.
        let mut text_drawable = false;
        let layout = if input.quote.is_empty() {
            None
        } else {
            match text.ensure_ready(&input.style.main_font()) {
                Ok(_) => text_drawable = true,
                Err(err) => {
                    tracing::warn!(%err, "no usable font, quote measured with fallback metrics")
                }
            }
            layout_quote(input.quote, input.style, frame, text)
        };
        let background = input.background.filter(|img| !img.is_empty());
        let watermark = input
            .watermark
            .filter(|img| input.watermark_options.enabled && !img.is_empty());

        self.with_ctx_mut(width, height, |this, ctx| {
            fill_rect(ctx, frame.rect(), &PaintStyle::solid(Rgba8::BLACK));

            if let Some(img) = background {
                this.draw_background(ctx, img, frame, input.transform);
            }

            if let Some(layout) = &layout {
                if let Some(bg) = layout.background {
                    fill_rounded(ctx, bg, &PaintStyle::text_background(input.style));
                }
                if text_drawable {
                    this.draw_text(ctx, layout, input.style, text);
                }
            }

            if let Some(img) = watermark {
                this.draw_watermark(ctx, img, input.watermark_options, frame);
            }

            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: frame.width,
                height: frame.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> QuotegenxResult<R>,
    ) -> QuotegenxResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_background(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        img: &PreparedImage,
        frame: FrameSize,
        transform: ImageTransform,
    ) {
        let Some(dest) = img
            .aspect()
            .and_then(|aspect| cover_draw_rect(aspect, frame, transform))
        else {
            return;
        };
        match self.image_paint(ImageRole::Background, img) {
            Ok(paint) => draw_image(ctx, paint, img, dest, &PaintStyle::image(1.0)),
            Err(err) => tracing::warn!(%err, "background image not drawn"),
        }
    }

    fn draw_watermark(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        img: &PreparedImage,
        opts: &WatermarkOptions,
        frame: FrameSize,
    ) {
        let Some(dest) = img.aspect().and_then(|a| watermark_rect(opts, a, frame)) else {
            return;
        };
        match self.image_paint(ImageRole::Watermark, img) {
            Ok(paint) => draw_image(ctx, paint, img, dest, &PaintStyle::image(opts.opacity)),
            Err(err) => tracing::warn!(%err, "watermark image not drawn"),
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &QuoteLayout,
        style: &StyleOptions,
        text: &mut TextEngine,
    ) {
        let main = PaintStyle::main_text(style);
        for line in &layout.lines {
            self.draw_line(
                ctx,
                layout,
                text,
                &layout.main_font,
                &line.text,
                line.baseline_y,
                &main,
            );
        }

        if let Some(attribution) = &layout.attribution {
            let paint = PaintStyle::attribution_text(style);
            self.draw_line(
                ctx,
                layout,
                text,
                &layout.attribution_font,
                &attribution.text,
                attribution.baseline_y,
                &paint,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &QuoteLayout,
        text: &mut TextEngine,
        font: &FontSpec,
        line: &str,
        baseline_y: f64,
        paint: &PaintStyle,
    ) {
        let shaped = match text.shape_line(font, line) {
            Ok(shaped) => shaped,
            Err(err) => {
                tracing::warn!(%err, line, "failed to shape line");
                return;
            }
        };
        let origin = Point::new(layout.left_for(shaped.width), baseline_y);
        let font_data = self.font_for(&shaped.face);
        draw_glyphs(ctx, &font_data, &shaped, origin, paint);
    }

    fn font_for(&mut self, face: &ResolvedFace) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(face.slot)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::new(face.face.data.clone()),
                    face.face.index,
                )
            })
            .clone()
    }

    fn image_paint(
        &mut self,
        role: ImageRole,
        img: &PreparedImage,
    ) -> QuotegenxResult<vello_cpu::Image> {
        if let Some(cached) = self.image_cache.get(&role)
            && Arc::ptr_eq(&cached.source, &img.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }

        let pixmap = image_premul_bytes_to_pixmap(img)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(
            role,
            CachedPaint {
                source: img.rgba8_premul.clone(),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }
}

fn begin_paint(ctx: &mut vello_cpu::RenderContext, transform: Affine, paint: &PaintStyle) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    if paint.is_translucent() {
        ctx.push_opacity_layer(paint.opacity);
    }
}

fn end_paint(ctx: &mut vello_cpu::RenderContext, paint: &PaintStyle) {
    if paint.is_translucent() {
        ctx.pop_layer();
    }
}

fn fill_rect(ctx: &mut vello_cpu::RenderContext, rect: Rect, paint: &PaintStyle) {
    begin_paint(ctx, Affine::IDENTITY, paint);
    ctx.set_paint(color_to_cpu(paint.fill));
    ctx.fill_rect(&rect_to_cpu(rect));
    end_paint(ctx, paint);
}

fn fill_rounded(ctx: &mut vello_cpu::RenderContext, bg: BackgroundBox, paint: &PaintStyle) {
    let r = bg.rect;
    let radius = bg.radius.min(r.width().min(r.height()) / 2.0).max(0.0);
    let rr = kurbo::RoundedRect::from_rect(r, radius);
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in rr.path_elements(0.1) {
        path.push(el);
    }

    begin_paint(ctx, Affine::IDENTITY, paint);
    ctx.set_paint(color_to_cpu(paint.fill));
    ctx.fill_path(&path);
    end_paint(ctx, paint);
}

/// Draw `img` stretched into `dest`.
fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    paint_image: vello_cpu::Image,
    img: &PreparedImage,
    dest: Rect,
    paint: &PaintStyle,
) {
    let (w, h) = (f64::from(img.width), f64::from(img.height));
    let transform = Affine::translate((dest.x0, dest.y0))
        * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

    begin_paint(ctx, transform, paint);
    ctx.set_paint(paint_image);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    end_paint(ctx, paint);
}

/// Stroke the outline (if any) underneath, then fill.
fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    shaped: &ShapedLine,
    origin: Point,
    paint: &PaintStyle,
) {
    let glyphs = || {
        shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        })
    };

    begin_paint(ctx, Affine::translate(origin.to_vec2()), paint);
    if let Some(outline) = paint.outline {
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(outline.width).with_join(vello_cpu::kurbo::Join::Round),
        );
        ctx.set_paint(color_to_cpu(outline.color));
        ctx.glyph_run(font)
            .font_size(shaped.size_px)
            .stroke_glyphs(glyphs());
    }
    ctx.set_paint(color_to_cpu(paint.fill));
    ctx.glyph_run(font)
        .font_size(shaped.size_px)
        .fill_glyphs(glyphs());
    end_paint(ctx, paint);
}

fn image_premul_bytes_to_pixmap(img: &PreparedImage) -> QuotegenxResult<vello_cpu::Pixmap> {
    let w: u16 = img
        .width
        .try_into()
        .map_err(|_| QuotegenxError::render("image width exceeds u16"))?;
    let h: u16 = img
        .height
        .try_into()
        .map_err(|_| QuotegenxError::render("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let pixels: Vec<_> = img
        .rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
