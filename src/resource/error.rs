//! Error types for resource access

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Resource not found: {name}")]
    NotFound { name: String },

    #[error("I/O error reading '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Wrap an I/O error, mapping `NotFound` to its own variant.
    pub fn from_io(name: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ResourceError::NotFound {
                name: name.to_string(),
            }
        } else {
            ResourceError::Io {
                name: name.to_string(),
                source: err,
            }
        }
    }

    /// Name of the resource that failed.
    pub fn name(&self) -> &str {
        match self {
            ResourceError::NotFound { name } | ResourceError::Io { name, .. } => name,
        }
    }
}
