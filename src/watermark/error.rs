//! Watermark error types.
//!
//! Defines errors that can occur while loading assets for, rendering, or
//! compositing a watermark.

use crate::resource::ResourceError;
use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug)]
pub enum WatermarkError {
    /// A required asset (image, font) does not exist
    NotFound(String),

    /// An asset exists but could not be read
    ReadError(String),

    /// Failed to decode an image
    DecodeError(String),

    /// Failed to load or parse a font face
    FontLoadError(String),

    /// Failed to rescale the watermark image
    ResizeError(String),

    /// Invalid watermark configuration
    ConfigError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Watermark asset not found: {}", msg),
            Self::ReadError(msg) => write!(f, "Failed to read watermark asset: {}", msg),
            Self::DecodeError(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::FontLoadError(msg) => write!(f, "Failed to load font: {}", msg),
            Self::ResizeError(msg) => write!(f, "Failed to resize watermark: {}", msg),
            Self::ConfigError(msg) => write!(f, "Watermark configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl From<ResourceError> for WatermarkError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { name } => Self::NotFound(name),
            err @ ResourceError::Io { .. } => Self::ReadError(err.to_string()),
        }
    }
}

impl WatermarkError {
    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "resource_not_found",
            Self::ReadError(_) => "read_failure",
            Self::DecodeError(_) => "decode_failure",
            Self::FontLoadError(_) => "font_load_failure",
            Self::ResizeError(_) => "resize_failure",
            Self::ConfigError(_) => "config_error",
        }
    }
}
