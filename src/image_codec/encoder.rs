//! Image encoder abstraction
//!
//! One encoder per output format behind the [`ImageEncoder`] trait, selected
//! through [`EncoderFactory`].

use super::error::ImageError;
use super::format::OutputFormat;
use crate::constants::DEFAULT_JPEG_QUALITY;
use image::{ColorType, ImageEncoder as _, RgbImage, RgbaImage};

/// Quality settings for image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    /// Quality value (1-100, where 100 is best quality)
    pub quality: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncoderQuality {
    /// Create quality settings with specified quality level
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

/// Encodes a straight-alpha RGBA raster into one output format.
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, image: &RgbaImage, quality: EncoderQuality) -> Result<Vec<u8>, ImageError>;
}

/// Baseline JPEG at the configured quality.
///
/// JPEG has no alpha channel; pixels are composited over black first, so a
/// fully transparent pixel encodes as black.
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn encode(&self, image: &RgbaImage, quality: EncoderQuality) -> Result<Vec<u8>, ImageError> {
        let rgb = flatten_over_black(image);

        let mut buffer = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .map_err(|e| ImageError::encode_failed(OutputFormat::Jpeg.as_str(), e.to_string()))?;

        Ok(buffer)
    }
}

/// Lossless RGBA PNG; quality is ignored.
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, image: &RgbaImage, _quality: EncoderQuality) -> Result<Vec<u8>, ImageError> {
        let mut buffer = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buffer)
            .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
            .map_err(|e| ImageError::encode_failed(OutputFormat::Png.as_str(), e.to_string()))?;

        Ok(buffer)
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for the given output format
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
        }
    }
}

/// Drop alpha by premultiplying each channel, i.e. compositing over black.
fn flatten_over_black(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let premultiply = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        image::Rgb([premultiply(r), premultiply(g), premultiply(b)])
    })
}
