//! In-memory resource reader (HashMap storage)

use super::{ResourceError, ResourceReader};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Reader that serves resources from memory.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct MemoryResourceReader {
    files: Arc<RwLock<HashMap<String, Bytes>>>,
    /// Simulate I/O errors if true
    simulate_io_error: Arc<RwLock<bool>>,
}

impl MemoryResourceReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a resource under `name`, replacing any previous value.
    pub fn insert(&self, name: impl Into<String>, data: impl Into<Bytes>) {
        self.files.write().insert(name.into(), data.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(self, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(name, data);
        self
    }

    /// Remove a resource.
    pub fn remove(&self, name: &str) -> Option<Bytes> {
        self.files.write().remove(name)
    }

    /// Enable I/O error simulation for testing
    pub fn set_io_error(&self, enabled: bool) {
        *self.simulate_io_error.write() = enabled;
    }

    /// Number of stored resources
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl std::fmt::Debug for MemoryResourceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<String> = self.files.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("MemoryResourceReader")
            .field("resources", &names)
            .finish()
    }
}

impl ResourceReader for MemoryResourceReader {
    fn read(&self, name: &str) -> Result<Bytes, ResourceError> {
        if *self.simulate_io_error.read() {
            return Err(ResourceError::Io {
                name: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "Simulated I/O error"),
            });
        }

        self.files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }
}
