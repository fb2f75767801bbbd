//! Shared watermark style.
//!
//! Both watermark kinds carry a [`WatermarkStyle`] by value and expose its
//! fields through the [`Styled`] trait.

use super::WatermarkError;

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White color.
    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    pub fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Parse a hex color string into RGBA components.
///
/// Supports #RGB, #RRGGBB and #RRGGBBAA. Alpha defaults to 255.
///
/// # Examples
///
/// ```
/// use watermark_preview::watermark::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("#FFF").unwrap(), Color::white());
/// assert_eq!(parse_hex_color("#FF000080").unwrap(), Color::rgba(255, 0, 0, 128));
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Color, WatermarkError> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| WatermarkError::ConfigError("Color must start with '#'".to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WatermarkError::ConfigError(format!(
            "Invalid hex digit in color '{}'",
            hex
        )));
    }

    let byte = |range: std::ops::Range<usize>| -> Result<u8, WatermarkError> {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| WatermarkError::ConfigError("Invalid hex digit".to_string()))
    };

    match digits.len() {
        3 => {
            // Double each component: 0xF -> 0xFF, 0xA -> 0xAA
            Ok(Color::new(byte(0..1)? * 17, byte(1..2)? * 17, byte(2..3)? * 17))
        }
        6 => Ok(Color::new(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
        8 => Ok(Color::rgba(
            byte(0..2)?,
            byte(2..4)?,
            byte(4..6)?,
            byte(6..8)?,
        )),
        n => Err(WatermarkError::ConfigError(format!(
            "Color must be #RGB, #RRGGBB or #RRGGBBAA format, got {} characters",
            n
        ))),
    }
}

/// Style parameters common to every watermark kind.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkStyle {
    /// Opacity (0.0 to 1.0).
    pub opacity: f32,
    /// Drawing color.
    pub color: Color,
    /// Font resource name.
    pub font: String,
    /// Font size in points.
    pub size: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            color: Color::default(),
            font: String::new(),
            size: 0.0,
            rotation: 0.0,
        }
    }
}

impl WatermarkStyle {
    /// Style that only sets an opacity.
    pub fn with_opacity(opacity: f32) -> Self {
        Self {
            opacity,
            ..Self::default()
        }
    }
}

/// Accessor delegation to an embedded [`WatermarkStyle`].
pub trait Styled {
    fn style(&self) -> &WatermarkStyle;

    fn opacity(&self) -> f32 {
        self.style().opacity
    }

    fn color(&self) -> Color {
        self.style().color
    }

    fn font(&self) -> &str {
        &self.style().font
    }

    fn size(&self) -> f32 {
        self.style().size
    }

    fn rotation(&self) -> f32 {
        self.style().rotation
    }
}
