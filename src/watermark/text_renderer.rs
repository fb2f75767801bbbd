//! Text watermark rendering.
//!
//! Renders a line of text, centered and rotated, onto a transparent canvas
//! the size of the target image, then blends that layer onto the target
//! through a uniform opacity mask.
//!
//! Font sizes are em sizes in points at 72 dpi, so a 35pt face draws an em
//! square of 35 pixels. Rotation follows the stored sign convention:
//! `radians = -degrees × π/180`, in image coordinates (y down).

use super::compositor::{blend_pixels, draw_over_masked, uniform_mask_alpha};
use super::style::{Styled, WatermarkStyle};
use super::WatermarkError;
use crate::resource::ResourceReader;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

/// Watermark made from a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWatermark {
    style: WatermarkStyle,
    text: String,
}

impl TextWatermark {
    pub fn new(style: WatermarkStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the text onto a transparent `width`×`height` canvas.
    ///
    /// The text is centered on the canvas (anchor 0.5, 0.5) and rotated
    /// about the canvas center. Opacity is not applied here, only the
    /// color's own alpha.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        reader: &dyn ResourceReader,
    ) -> Result<RgbaImage, WatermarkError> {
        let mut canvas = RgbaImage::new(width, height);
        let font = load_font(reader, self.font())?;

        if self.text.is_empty() || width == 0 || height == 0 {
            return Ok(canvas);
        }

        let scale = em_scale(&font, self.size());
        let radians = rotation_radians(self.rotation());

        tracing::debug!(
            font = %self.font(),
            size = self.size(),
            rotation = self.rotation(),
            width,
            height,
            "Rendering text watermark"
        );

        if radians == 0.0 {
            draw_text_centered(
                &mut canvas,
                &font,
                scale,
                &self.text,
                self.color().to_pixel(),
                width as f32 / 2.0,
                height as f32 / 2.0,
            );
            return Ok(canvas);
        }

        // Any canvas pixel lies within hypot(w, h) / 2 of the center, so a
        // square scratch of that diameter covers every rotated sample.
        let side = (width as f32).hypot(height as f32).ceil() as u32 + 2;
        let mut scratch = RgbaImage::new(side, side);
        draw_text_centered(
            &mut scratch,
            &font,
            scale,
            &self.text,
            self.color().to_pixel(),
            side as f32 / 2.0,
            side as f32 / 2.0,
        );

        rotate_into(&scratch, &mut canvas, radians);
        Ok(canvas)
    }

    /// Return a copy of `base` with the text layer blended over it.
    ///
    /// The layer is rendered at the base's size and blended through a
    /// uniform mask of `⌊opacity × 255⌋`; an opacity of 0 leaves the copy
    /// byte-identical to the base.
    pub fn create_watermarked_image(
        &self,
        base: &RgbaImage,
        reader: &dyn ResourceReader,
    ) -> Result<RgbaImage, WatermarkError> {
        let layer = self.render(base.width(), base.height(), reader)?;

        let mut output = base.clone();
        draw_over_masked(&mut output, &layer, uniform_mask_alpha(self.opacity()));
        Ok(output)
    }
}

impl Styled for TextWatermark {
    fn style(&self) -> &WatermarkStyle {
        &self.style
    }
}

/// Load a TrueType/OpenType face from a resource.
pub fn load_font(reader: &dyn ResourceReader, name: &str) -> Result<FontVec, WatermarkError> {
    let data = reader.read(name)?;
    FontVec::try_from_vec(data.to_vec())
        .map_err(|e| WatermarkError::FontLoadError(format!("{}: {}", name, e)))
}

/// Convert a rotation in degrees to the drawing angle in radians.
pub fn rotation_radians(degrees: f32) -> f32 {
    -degrees.to_radians()
}

/// Pixel scale for an em size in points (72 dpi).
///
/// ab_glyph scales by line height (ascent - descent), not by em.
fn em_scale(font: &FontVec, size: f32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * font.height_unscaled() / units_per_em)
}

/// Horizontal advance of `text`, including kerning.
fn advance_width<F: Font>(font: &F, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    width
}

/// Draw `text` with its line box centered on `(cx, cy)`.
fn draw_text_centered<F: Font>(
    canvas: &mut RgbaImage,
    font: &F,
    scale: PxScale,
    text: &str,
    color: Rgba<u8>,
    cx: f32,
    cy: f32,
) {
    let scaled = font.as_scaled(scale);

    // Anchor (0.5, 0.5): half the advance to the left, baseline half the
    // line box below the center (descent is negative).
    let mut cursor_x = cx - 0.5 * advance_width(font, scale, text);
    let baseline_y = cy + 0.5 * (scaled.ascent() + scaled.descent());

    let canvas_width = canvas.width() as i32;
    let canvas_height = canvas.height() as i32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < canvas_width && y < canvas_height {
                    let existing = *canvas.get_pixel(x as u32, y as u32);
                    let blended = blend_pixels(existing, color, coverage);
                    canvas.put_pixel(x as u32, y as u32, blended);
                }
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }
}

/// Resample `src` rotated by `radians` about its center into `dst`, whose
/// center is aligned with the source center.
///
/// Inverse-maps every destination pixel center and samples bilinearly with
/// premultiplied alpha; samples outside the source are transparent.
fn rotate_into(src: &RgbaImage, dst: &mut RgbaImage, radians: f32) {
    let (sin, cos) = radians.sin_cos();

    let src_cx = src.width() as f32 / 2.0;
    let src_cy = src.height() as f32 / 2.0;
    let dst_cx = dst.width() as f32 / 2.0;
    let dst_cy = dst.height() as f32 / 2.0;

    for dy in 0..dst.height() {
        for dx in 0..dst.width() {
            let vx = dx as f32 + 0.5 - dst_cx;
            let vy = dy as f32 + 0.5 - dst_cy;

            // Inverse of the forward rotation (x cos - y sin, x sin + y cos)
            let sx = vx * cos + vy * sin + src_cx;
            let sy = -vx * sin + vy * cos + src_cy;

            let pixel = sample_bilinear(src, sx - 0.5, sy - 0.5);
            if pixel[3] > 0 {
                dst.put_pixel(dx, dy, pixel);
            }
        }
    }
}

/// Bilinear sample at continuous pixel coordinates with premultiplied alpha.
fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let fetch = |px: i64, py: i64| -> [f32; 4] {
        if px < 0 || py < 0 || px >= image.width() as i64 || py >= image.height() as i64 {
            return [0.0; 4];
        }
        let p = image.get_pixel(px as u32, py as u32);
        let a = p[3] as f32 / 255.0;
        [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
    };

    let taps = [
        (fetch(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (fetch(x0 + 1, y0), fx * (1.0 - fy)),
        (fetch(x0, y0 + 1), (1.0 - fx) * fy),
        (fetch(x0 + 1, y0 + 1), fx * fy),
    ];

    let mut acc = [0.0f32; 4];
    for (value, weight) in taps {
        for c in 0..4 {
            acc[c] += value[c] * weight;
        }
    }

    let alpha = acc[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let unpremultiply = |v: f32| -> u8 { (v * 255.0 / alpha).round().clamp(0.0, 255.0) as u8 };

    Rgba([
        unpremultiply(acc[0]),
        unpremultiply(acc[1]),
        unpremultiply(acc[2]),
        alpha.round().clamp(0.0, 255.0) as u8,
    ])
}
