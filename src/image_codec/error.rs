//! Image codec error types
//!
//! Structured encoding errors. Every variant ends the request with a 500 and
//! a static body; the details are for the log.

use std::fmt;

/// Errors that can occur while encoding an output image
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Output format tag is not supported
    UnsupportedFormat { format: String },
    /// Encoding to the output format failed
    EncodeFailed { format: String, message: String },
    /// Image buffer has a zero dimension
    InvalidDimensions { width: u32, height: u32 },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::UnsupportedFormat { format } => {
                write!(f, "Unsupported output format: {}", format)
            }
            ImageError::EncodeFailed { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
            ImageError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl ImageError {
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImageError::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImageError::EncodeFailed {
            format: format.into(),
            message: message.into(),
        }
    }
}
