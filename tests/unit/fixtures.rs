// Shared test fixtures: an in-memory asset set matching the default configuration

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use watermark_preview::config::GalleryConfig;
use watermark_preview::gallery::Gallery;
use watermark_preview::resource::{MemoryResourceReader, ResourceReader};

pub const FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
pub const TEMPLATE: &str = include_str!("../../templates/images.html");

pub const BASE_WIDTH: u32 = 320;
pub const BASE_HEIGHT: u32 = 240;

/// Opaque mid-gray photo stand-in
pub fn base_photo() -> RgbImage {
    RgbImage::from_pixel(BASE_WIDTH, BASE_HEIGHT, Rgb([128, 128, 128]))
}

/// Opaque red 40x20 watermark
pub fn watermark_bitmap() -> RgbaImage {
    RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255]))
}

pub fn jpeg_bytes(img: RgbImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

pub fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Reader holding every asset the default gallery configuration names
pub fn default_assets() -> MemoryResourceReader {
    let config = GalleryConfig::default();
    MemoryResourceReader::new()
        .with(config.graphical.base_image, jpeg_bytes(base_photo()))
        .with(config.graphical.watermark, png_bytes(watermark_bitmap()))
        .with(config.text.base_image, jpeg_bytes(base_photo()))
        .with(config.text.font, FONT.to_vec())
        .with(config.template, TEMPLATE.as_bytes().to_vec())
}

pub fn gallery_with(config: GalleryConfig, reader: &MemoryResourceReader) -> Gallery {
    let reader: Arc<dyn ResourceReader> = Arc::new(reader.clone());
    Gallery::new(config, reader).unwrap()
}

pub fn default_gallery(reader: &MemoryResourceReader) -> Gallery {
    gallery_with(GalleryConfig::default(), reader)
}

/// Extract the base64 payloads of every `data:` URI in a page
pub fn data_uri_payloads(html: &str) -> Vec<String> {
    html.split("base64,")
        .skip(1)
        .map(|rest| rest.split('"').next().unwrap_or_default().to_string())
        .collect()
}
