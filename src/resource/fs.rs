//! Filesystem-backed resource reader

use super::{ResourceError, ResourceReader};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// Reads resources from files below a root directory.
///
/// Absolute names bypass the root.
#[derive(Debug, Clone)]
pub struct FsResourceReader {
    root: PathBuf,
}

impl FsResourceReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory relative names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a resource name to a filesystem path.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ResourceReader for FsResourceReader {
    fn read(&self, name: &str) -> Result<Bytes, ResourceError> {
        let path = self.resolve(name);
        tracing::debug!(resource = name, path = %path.display(), "Reading resource");

        std::fs::read(&path)
            .map(Bytes::from)
            .map_err(|e| ResourceError::from_io(name, e))
    }
}
