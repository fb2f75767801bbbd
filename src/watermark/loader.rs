//! Image loading: named resource → decoded RGBA buffer.

use super::WatermarkError;
use crate::resource::ResourceReader;
use image::io::Reader as ImageReader;
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;

/// Read a resource and decode it into an RGBA image.
///
/// The format is detected from the data, not the name.
pub fn load_image(reader: &dyn ResourceReader, name: &str) -> Result<RgbaImage, WatermarkError> {
    let data = reader.read(name)?;
    let image = decode_image(&data).map_err(|e| match e {
        WatermarkError::DecodeError(msg) => WatermarkError::DecodeError(format!("{name}: {msg}")),
        other => other,
    })?;

    tracing::debug!(
        resource = name,
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );

    Ok(image.to_rgba8())
}

/// Decode image data into a DynamicImage
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, WatermarkError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| WatermarkError::DecodeError(e.to_string()))?
        .decode()
        .map_err(|e| WatermarkError::DecodeError(e.to_string()))
}
