//! Watermark compositor for blending layers onto images.
//!
//! Two blend modes are provided:
//!
//! - [`draw_over`]: Porter-Duff "over" weighted by each source pixel's alpha,
//!   at an arbitrary (possibly negative) offset. Used for bitmap watermarks.
//! - [`draw_over_masked`]: the same operator with an additional uniform alpha
//!   mask applied to the whole layer. Used for text layers, so glyph
//!   antialiasing and opacity multiply.
//!
//! Source pixels with zero effective alpha leave the target untouched, so a
//! transparent layer (or a zero mask) produces a byte-identical image.

use image::{Rgba, RgbaImage};

/// Top-left corner of a layer in target coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

/// Offset that centers a `wm_width`×`wm_height` layer on a
/// `base_width`×`base_height` image.
///
/// Uses integer division truncating toward zero; a layer larger than the
/// base gets a negative offset and is clipped.
pub fn center_offset(
    base_width: u32,
    base_height: u32,
    wm_width: u32,
    wm_height: u32,
) -> PlacementPosition {
    PlacementPosition {
        x: (base_width as i32 - wm_width as i32) / 2,
        y: (base_height as i32 - wm_height as i32) / 2,
    }
}

/// Uniform mask alpha for an opacity in `[0, 1]`.
///
/// Truncates like an integer cast: `0.6` gives `153`.
pub fn uniform_mask_alpha(opacity: f32) -> u8 {
    (255.0 * opacity.clamp(0.0, 1.0)) as u8
}

/// Draw `layer` over `target` with its top-left corner at `position`.
pub fn draw_over(target: &mut RgbaImage, layer: &RgbaImage, position: PlacementPosition) {
    blend_layer(target, layer, position, 1.0);
}

/// Draw `layer` over `target` (aligned at the origin) through a uniform
/// alpha mask.
pub fn draw_over_masked(target: &mut RgbaImage, layer: &RgbaImage, mask_alpha: u8) {
    if mask_alpha == 0 {
        return;
    }
    blend_layer(
        target,
        layer,
        PlacementPosition::default(),
        mask_alpha as f32 / 255.0,
    );
}

/// Blend a layer onto the target image, clipped to the target bounds.
fn blend_layer(target: &mut RgbaImage, layer: &RgbaImage, position: PlacementPosition, coverage: f32) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let layer_width = layer.width() as i32;
    let layer_height = layer.height() as i32;

    // Visible region
    let x_start = position.x.max(0);
    let y_start = position.y.max(0);
    let x_end = (position.x + layer_width).min(target_width);
    let y_end = (position.y + layer_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let lx = (tx - position.x) as u32;
            let ly = (ty - position.y) as u32;

            let src = *layer.get_pixel(lx, ly);
            let dst = target.get_pixel_mut(tx as u32, ty as u32);
            *dst = blend_pixels(*dst, src, coverage);
        }
    }
}

/// Blend two pixels with the "over" operator.
///
/// `coverage` scales the foreground alpha (1.0 = use it as is):
/// result = foreground + background * (1 - foreground.alpha)
pub(crate) fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let fg_alpha = (foreground[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if fg_alpha <= 0.0 {
        return background;
    }

    let bg_alpha = background[3] as f32 / 255.0;
    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let result =
            (fg as f32 * fg_alpha + bg as f32 * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        result.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
