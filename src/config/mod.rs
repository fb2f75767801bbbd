// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod gallery;
pub mod server;

pub use gallery::{GalleryConfig, GraphicalWatermarkConfig, TextWatermarkConfig};
pub use server::{AssetsConfig, ServerConfig};

use crate::image_codec::OutputFormat;
use crate::watermark::parse_hex_color;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values, outside comments
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        let mut substituted = String::with_capacity(yaml.len());
        let mut has_content = false;
        for line in yaml.lines() {
            let (content, comment) = split_yaml_comment(line);
            has_content |= !content.trim().is_empty();

            // First, check that all referenced environment variables exist
            for caps in re.captures_iter(content) {
                let var_name = &caps[1];
                std::env::var(var_name).map_err(|_| {
                    format!(
                        "Environment variable '{}' is referenced but not set",
                        var_name
                    )
                })?;
            }

            let replaced = re.replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_default()
            });
            substituted.push_str(&replaced);
            substituted.push_str(comment);
            substituted.push('\n');
        }

        // An empty or comment-only document means "all defaults"
        if !has_content {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.address.trim().is_empty() {
            return Err("server.address cannot be empty".to_string());
        }

        if self.server.port == 0 {
            return Err("server.port must be > 0".to_string());
        }

        if self.server.threads == 0 {
            return Err("server.threads must be > 0".to_string());
        }

        let gallery = &self.gallery;

        if gallery.template.trim().is_empty() {
            return Err("gallery.template cannot be empty".to_string());
        }

        if !OutputFormat::is_supported(&gallery.output_format) {
            return Err(format!(
                "gallery.output_format '{}' is not supported (expected jpeg, jpg or png)",
                gallery.output_format
            ));
        }

        if !(1..=100).contains(&gallery.jpeg_quality) {
            return Err(format!(
                "gallery.jpeg_quality {} must be between 1 and 100",
                gallery.jpeg_quality
            ));
        }

        // Graphical watermark
        let graphical = &gallery.graphical;
        if graphical.base_image.trim().is_empty() {
            return Err("gallery.graphical.base_image cannot be empty".to_string());
        }
        validate_opacity("gallery.graphical.opacity", graphical.opacity)?;
        if !graphical.scale.is_finite() || graphical.scale <= 0.0 {
            return Err(format!(
                "gallery.graphical.scale {} must be a positive number",
                graphical.scale
            ));
        }

        // Text watermark
        let text = &gallery.text;
        if text.base_image.trim().is_empty() {
            return Err("gallery.text.base_image cannot be empty".to_string());
        }
        if text.font.trim().is_empty() {
            return Err("gallery.text.font cannot be empty".to_string());
        }
        validate_opacity("gallery.text.opacity", text.opacity)?;
        if !text.font_size.is_finite() || text.font_size <= 0.0 {
            return Err(format!(
                "gallery.text.font_size {} must be a positive number",
                text.font_size
            ));
        }
        if !text.rotation.is_finite() {
            return Err("gallery.text.rotation must be a finite number".to_string());
        }
        parse_hex_color(&text.color).map_err(|e| format!("gallery.text.color: {}", e))?;

        Ok(())
    }
}

/// Split a YAML line into content and trailing comment.
///
/// A comment starts at a `#` that begins the line or follows whitespace,
/// outside quoted scalars.
fn split_yaml_comment(line: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut after_space = true;

    for (i, c) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if after_space && (c == '"' || c == '\'') => quote = Some(c),
            None if after_space && c == '#' => return line.split_at(i),
            None => {}
        }
        after_space = c.is_whitespace();
    }

    (line, "")
}

fn validate_opacity(field: &str, opacity: f32) -> Result<(), String> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(format!(
            "{} {} must be between 0.0 and 1.0",
            field, opacity
        ));
    }
    Ok(())
}
