//! Gallery configuration types.
//!
//! Describes the two preview images, their watermarks, the page template,
//! and the encoding of the embedded images. Defaults reproduce the stock
//! preview page.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, DEFAULT_GRAPHICAL_BASE_IMAGE, DEFAULT_JPEG_QUALITY,
    DEFAULT_OPACITY, DEFAULT_OUTPUT_FORMAT, DEFAULT_TEMPLATE_PATH, DEFAULT_TEXT_BASE_IMAGE,
    DEFAULT_TEXT_COLOR, DEFAULT_TEXT_ROTATION, DEFAULT_WATERMARK_IMAGE, DEFAULT_WATERMARK_SCALE,
    DEFAULT_WATERMARK_TEXT,
};
use crate::image_codec::EncoderQuality;
use crate::watermark::{
    parse_hex_color, GraphicalWatermark, TextWatermark, WatermarkError, WatermarkStyle,
};

fn default_template() -> String {
    DEFAULT_TEMPLATE_PATH.to_string()
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

fn default_graphical_base_image() -> String {
    DEFAULT_GRAPHICAL_BASE_IMAGE.to_string()
}

fn default_watermark_image() -> String {
    DEFAULT_WATERMARK_IMAGE.to_string()
}

fn default_watermark_scale() -> f32 {
    DEFAULT_WATERMARK_SCALE
}

fn default_text_base_image() -> String {
    DEFAULT_TEXT_BASE_IMAGE.to_string()
}

fn default_watermark_text() -> String {
    DEFAULT_WATERMARK_TEXT.to_string()
}

fn default_font() -> String {
    DEFAULT_FONT_PATH.to_string()
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_text_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

fn default_text_rotation() -> f32 {
    DEFAULT_TEXT_ROTATION
}

/// Page and encoding settings plus both watermark pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// HTML template resource with `Image1`, `Image2` and `ImageType` slots
    #[serde(default = "default_template")]
    pub template: String,
    /// Encoding of embedded images: jpeg, jpg or png (default: jpeg)
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// JPEG quality 1-100 (default: 75)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default)]
    pub graphical: GraphicalWatermarkConfig,
    #[serde(default)]
    pub text: TextWatermarkConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            output_format: default_output_format(),
            jpeg_quality: default_jpeg_quality(),
            graphical: GraphicalWatermarkConfig::default(),
            text: TextWatermarkConfig::default(),
        }
    }
}

impl GalleryConfig {
    pub fn encoder_quality(&self) -> EncoderQuality {
        EncoderQuality::with_quality(self.jpeg_quality)
    }
}

/// First image: a bitmap watermark over a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicalWatermarkConfig {
    #[serde(default = "default_graphical_base_image")]
    pub base_image: String,
    /// Watermark bitmap; empty disables the watermark
    #[serde(default = "default_watermark_image")]
    pub watermark: String,
    /// Resize factor for the watermark (1.0 = original size)
    #[serde(default = "default_watermark_scale")]
    pub scale: f32,
    /// Carried for symmetry with text watermarks; bitmaps use their own alpha
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for GraphicalWatermarkConfig {
    fn default() -> Self {
        Self {
            base_image: default_graphical_base_image(),
            watermark: default_watermark_image(),
            scale: default_watermark_scale(),
            opacity: default_opacity(),
        }
    }
}

impl GraphicalWatermarkConfig {
    pub fn to_watermark(&self) -> GraphicalWatermark {
        GraphicalWatermark::new(
            WatermarkStyle::with_opacity(self.opacity),
            self.watermark.clone(),
            self.scale,
        )
    }
}

/// Second image: a rotated line of text over a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextWatermarkConfig {
    #[serde(default = "default_text_base_image")]
    pub base_image: String,
    #[serde(default = "default_watermark_text")]
    pub text: String,
    /// Font resource (TrueType or OpenType)
    #[serde(default = "default_font")]
    pub font: String,
    /// Em size in points at 72 dpi
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// #RGB, #RRGGBB or #RRGGBBAA
    #[serde(default = "default_text_color")]
    pub color: String,
    /// Degrees; drawn at -rotation radians (y axis down)
    #[serde(default = "default_text_rotation")]
    pub rotation: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for TextWatermarkConfig {
    fn default() -> Self {
        Self {
            base_image: default_text_base_image(),
            text: default_watermark_text(),
            font: default_font(),
            font_size: default_font_size(),
            color: default_text_color(),
            rotation: default_text_rotation(),
            opacity: default_opacity(),
        }
    }
}

impl TextWatermarkConfig {
    pub fn to_watermark(&self) -> Result<TextWatermark, WatermarkError> {
        let style = WatermarkStyle {
            opacity: self.opacity,
            color: parse_hex_color(&self.color)?,
            font: self.font.clone(),
            size: self.font_size,
            rotation: self.rotation,
        };
        Ok(TextWatermark::new(style, self.text.clone()))
    }
}
