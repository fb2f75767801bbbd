//! Image codec module
//!
//! Encodes watermarked images in memory for embedding in HTML:
//! - JPEG (composited over black, configurable quality) and PNG (RGBA kept)
//! - Standard base64 wrapping for `data:` URIs
//!
//! An unsupported format tag is not an error here: encoding yields an empty
//! buffer and logs a warning. Configuration validation rejects such tags
//! before the server starts.

pub mod encoder;
pub mod error;
pub mod format;

// Re-export commonly used types
pub use encoder::{EncoderFactory, EncoderQuality, ImageEncoder, JpegEncoder, PngEncoder};
pub use error::ImageError;
pub use format::OutputFormat;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;

/// Encode an image to the format named by `tag`.
///
/// Returns an empty buffer for an unsupported tag.
pub fn encode_image(
    image: &RgbaImage,
    tag: &str,
    quality: EncoderQuality,
) -> Result<Vec<u8>, ImageError> {
    let format = match tag.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(_) => {
            tracing::warn!(format = tag, "Unsupported output format, producing empty image");
            return Ok(Vec::new());
        }
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(ImageError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    }

    let encoder = EncoderFactory::create(format);
    let encoded = encoder.encode(image, quality)?;

    tracing::debug!(
        format = %format,
        width = image.width(),
        height = image.height(),
        bytes = encoded.len(),
        "Encoded image"
    );

    Ok(encoded)
}

/// Encode an image and wrap it in standard (padded) base64.
pub fn encode_to_base64(
    image: &RgbaImage,
    tag: &str,
    quality: EncoderQuality,
) -> Result<String, ImageError> {
    let encoded = encode_image(image, tag, quality)?;
    Ok(STANDARD.encode(encoded))
}
