use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{QuotegenxError, QuotegenxResult};
use crate::foundation::math::mul_div255_u8;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already premultiplied pixels, checking the buffer length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> QuotegenxResult<Self> {
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(QuotegenxError::validation(
                "prepared image byte length mismatch",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Natural `width / height`, or `None` for a zero-sized image.
    pub fn aspect(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

pub fn decode_image(bytes: &[u8]) -> QuotegenxResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage::from_premul(width, height, rgba8_premul)
}

/// Decode `bytes`, treating any failure as an absent image.
pub fn decode_image_lossy(bytes: &[u8], what: &str) -> Option<PreparedImage> {
    match decode_image(bytes) {
        Ok(img) if !img.is_empty() => Some(img),
        Ok(_) => {
            tracing::warn!(what, "decoded image has zero size; ignoring it");
            None
        }
        Err(err) => {
            tracing::warn!(what, error = %err, "image decode failed; rendering without it");
            None
        }
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
