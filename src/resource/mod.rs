//! Named resource access.
//!
//! Images, fonts and templates are read through a [`ResourceReader`] so the
//! rendering code never touches the filesystem directly. The server uses
//! [`FsResourceReader`]; tests use [`MemoryResourceReader`].

pub mod error;
pub mod fs;
pub mod memory;

use bytes::Bytes;

pub use error::ResourceError;
pub use fs::FsResourceReader;
pub use memory::MemoryResourceReader;

/// Abstraction over where named resources come from
pub trait ResourceReader: Send + Sync {
    /// Read the entire resource. The underlying handle is released before returning.
    fn read(&self, name: &str) -> Result<Bytes, ResourceError>;
}
