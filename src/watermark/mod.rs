//! Watermarking for preview images.
//!
//! Two watermark kinds share a [`WatermarkStyle`]:
//!
//! - [`GraphicalWatermark`]: a bitmap (optionally rescaled) alpha-blended over
//!   the center of the base image.
//! - [`TextWatermark`]: a line of text rendered centered and rotated onto a
//!   transparent layer, then blended over the base through a uniform opacity
//!   mask.
//!
//! All assets (base photos, watermark bitmap, font) are read through a
//! [`ResourceReader`](crate::resource::ResourceReader) on every call; nothing
//! is cached.
//!
//! # Example
//!
//! ```ignore
//! use watermark_preview::resource::FsResourceReader;
//! use watermark_preview::watermark::{load_image, GraphicalWatermark, WatermarkStyle};
//!
//! let reader = FsResourceReader::new("assets");
//! let base = load_image(&reader, "image.jpg")?;
//! let mark = GraphicalWatermark::new(WatermarkStyle::with_opacity(0.6), "logo.png", 1.0);
//! let watermarked = mark.apply_to_image(&base, &reader)?;
//! ```

pub mod compositor;
pub mod error;
pub mod graphical;
pub mod loader;
pub mod style;
pub mod text_renderer;

// Re-export main types for convenience
pub use compositor::{
    center_offset, draw_over, draw_over_masked, uniform_mask_alpha, PlacementPosition,
};
pub use error::WatermarkError;
pub use graphical::GraphicalWatermark;
pub use loader::{decode_image, load_image};
pub use style::{parse_hex_color, Color, Styled, WatermarkStyle};
pub use text_renderer::{load_font, rotation_radians, TextWatermark};
