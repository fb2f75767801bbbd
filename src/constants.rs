// Constants module - centralized default values for configuration
//
// Defaults reproduce the stock preview page: one photo with a bitmap
// copyright mark, one photo with a rotated text mark.

// =============================================================================
// Server defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_ADDRESS: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 4;

// =============================================================================
// Asset defaults
// =============================================================================

/// Default directory that relative asset names are resolved against
pub const DEFAULT_ASSET_ROOT: &str = ".";

/// Default HTML template
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/images.html";

/// Default encoding for embedded images
pub const DEFAULT_OUTPUT_FORMAT: &str = "jpeg";

/// Default JPEG quality (matches the stdlib encoders' default of 75)
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

// =============================================================================
// Graphical watermark defaults
// =============================================================================

/// Base photo for the graphical watermark
pub const DEFAULT_GRAPHICAL_BASE_IMAGE: &str = "image.jpg";

/// Bitmap watermark
pub const DEFAULT_WATERMARK_IMAGE: &str = "FG-copyright-mini.png";

/// Bitmap watermark scale (1.0 = no resize)
pub const DEFAULT_WATERMARK_SCALE: f32 = 1.0;

// =============================================================================
// Text watermark defaults
// =============================================================================

/// Base photo for the text watermark
pub const DEFAULT_TEXT_BASE_IMAGE: &str = "zerkalo-ozera.jpg";

/// Watermark text
pub const DEFAULT_WATERMARK_TEXT: &str = "пятаяпередача.рф";

/// Font file for the text watermark
pub const DEFAULT_FONT_PATH: &str = "Nunito-Medium.ttf";

/// Font size in points
pub const DEFAULT_FONT_SIZE: f32 = 35.0;

/// Text color (#RRGGBBAA)
pub const DEFAULT_TEXT_COLOR: &str = "#EFFA17FF";

/// Text rotation in degrees
pub const DEFAULT_TEXT_ROTATION: f32 = -29.5;

// =============================================================================
// Shared watermark defaults
// =============================================================================

/// Watermark opacity
pub const DEFAULT_OPACITY: f32 = 0.6;
