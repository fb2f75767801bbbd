//! Bitmap watermark: a decoded image drawn centered over the base.

use super::compositor::{center_offset, draw_over};
use super::loader::load_image;
use super::style::{Styled, WatermarkStyle};
use super::WatermarkError;
use crate::resource::ResourceReader;
use fast_image_resize::{FilterType, Image, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;
use std::num::NonZeroU32;

/// Watermark made from an image resource.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicalWatermark {
    style: WatermarkStyle,
    path: String,
    scale: f32,
}

impl GraphicalWatermark {
    pub fn new(style: WatermarkStyle, path: impl Into<String>, scale: f32) -> Self {
        Self {
            style,
            path: path.into(),
            scale,
        }
    }

    /// Resource name of the watermark image. Empty means "no watermark".
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Return a copy of `base` with the watermark drawn over its center.
    ///
    /// The watermark is resized by `scale` first unless the scale is exactly
    /// 1. Per-pixel alpha of the watermark is honored; the style opacity is
    /// not applied to bitmap watermarks.
    pub fn apply_to_image(
        &self,
        base: &RgbaImage,
        reader: &dyn ResourceReader,
    ) -> Result<RgbaImage, WatermarkError> {
        let mut output = base.clone();

        if self.path.is_empty() {
            return Ok(output);
        }

        let mut watermark = load_image(reader, &self.path)?;

        if self.scale != 1.0 {
            watermark = scale_watermark(&watermark, self.scale)?;
        }

        let position = center_offset(
            base.width(),
            base.height(),
            watermark.width(),
            watermark.height(),
        );

        tracing::debug!(
            watermark = %self.path,
            width = watermark.width(),
            height = watermark.height(),
            x = position.x,
            y = position.y,
            "Drawing graphical watermark"
        );

        draw_over(&mut output, &watermark, position);
        Ok(output)
    }
}

impl Styled for GraphicalWatermark {
    fn style(&self) -> &WatermarkStyle {
        &self.style
    }
}

/// Resize the watermark by `scale` with bilinear filtering.
///
/// Target dimensions truncate (`(width * scale) as u32`).
fn scale_watermark(watermark: &RgbaImage, scale: f32) -> Result<RgbaImage, WatermarkError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(WatermarkError::ResizeError(format!(
            "Scale must be positive, got {}",
            scale
        )));
    }

    let target_w = (watermark.width() as f32 * scale) as u32;
    let target_h = (watermark.height() as f32 * scale) as u32;

    let src_width = NonZeroU32::new(watermark.width())
        .ok_or_else(|| WatermarkError::ResizeError("Source width is 0".to_string()))?;
    let src_height = NonZeroU32::new(watermark.height())
        .ok_or_else(|| WatermarkError::ResizeError("Source height is 0".to_string()))?;
    let dst_width = NonZeroU32::new(target_w)
        .ok_or_else(|| WatermarkError::ResizeError("Target width is 0".to_string()))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| WatermarkError::ResizeError("Target height is 0".to_string()))?;

    let src_image = Image::from_vec_u8(
        src_width,
        src_height,
        watermark.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| WatermarkError::ResizeError(format!("Failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Bilinear));
    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| WatermarkError::ResizeError(format!("Resize operation failed: {:?}", e)))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| WatermarkError::ResizeError("Failed to create output image buffer".to_string()))
}
