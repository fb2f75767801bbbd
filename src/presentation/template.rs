//! HTML page templates with named slots.
//!
//! A template is HTML text with `{{ Slot }}` placeholders. A leading dot is
//! accepted, so `{{.Image1}}` and `{{ Image1 }}` name the same slot.
//!
//! Parsing happens once per load; rendering substitutes HTML-escaped values
//! and fails without partial output when a slot has no value.
//!
//! # Example
//!
//! ```ignore
//! use watermark_preview::presentation::HtmlTemplate;
//! use std::collections::HashMap;
//!
//! let template = HtmlTemplate::parse("<p>{{.Name}}</p>")?;
//! let mut slots = HashMap::new();
//! slots.insert("Name", "a < b".to_string());
//! assert_eq!(template.render(&slots)?, "<p>a &lt; b</p>");
//! ```

use crate::resource::ResourceReader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Regex pattern for matching slot placeholders: {{ .Name }}
static SLOT_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Gets the compiled slot pattern regex.
///
/// The pattern is a constant; `test_slot_regex_is_valid` covers the
/// `.expect()`.
fn get_slot_pattern() -> &'static Regex {
    SLOT_PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("Invalid slot regex - this is a compile-time bug")
    })
}

/// Errors from loading or executing a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template could not be read or parsed
    #[error("Failed to load template '{name}': {message}")]
    Load { name: String, message: String },

    /// The template could not be filled in
    #[error("Failed to execute template: no value for slot '{slot}'")]
    Execute { slot: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A parsed HTML template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl HtmlTemplate {
    /// Parse template source held in memory.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Self::parse_named("inline", source)
    }

    /// Read and parse a template resource.
    pub fn load(reader: &dyn ResourceReader, name: &str) -> Result<Self, TemplateError> {
        let data = reader.read(name).map_err(|e| TemplateError::Load {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let source = std::str::from_utf8(&data).map_err(|e| TemplateError::Load {
            name: name.to_string(),
            message: format!("invalid UTF-8: {}", e),
        })?;

        Self::parse_named(name, source)
    }

    fn parse_named(name: &str, source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut last = 0;

        let push_literal = |segments: &mut Vec<Segment>, text: &str| {
            if let Some(offset) = text.find("{{") {
                return Err(TemplateError::Load {
                    name: name.to_string(),
                    message: format!("unterminated or invalid action near byte {}", offset),
                });
            }
            if !text.is_empty() {
                segments.push(Segment::Literal(text.to_string()));
            }
            Ok(())
        };

        for caps in get_slot_pattern().captures_iter(source) {
            let (Some(whole), Some(slot)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            push_literal(&mut segments, &source[last..whole.start()])?;
            segments.push(Segment::Slot(slot.as_str().to_string()));
            last = whole.end();
        }
        push_literal(&mut segments, &source[last..])?;

        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot names in order of appearance (duplicates kept).
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fill every slot with its HTML-escaped value.
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        let mut output = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Slot(slot) => {
                    let value = values.get(slot.as_str()).ok_or_else(|| TemplateError::Execute {
                        slot: slot.clone(),
                    })?;
                    escape_html_into(value, &mut output);
                }
            }
        }

        Ok(output)
    }
}

/// Append `text` to `out` with HTML special characters escaped.
fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
