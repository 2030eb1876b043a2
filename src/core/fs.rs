//! Filesystem and MIME capability seams for file-based scanning.
//!
//! File scanning needs two host utilities: resolving a MIME type from a file
//! path and reading the file itself. Both are modeled as traits so request
//! building can be exercised without touching the real filesystem.

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

/// Resolves a MIME type from a file path.
pub trait MimeResolver: Send + Sync + Debug {
    /// Returns the MIME type for the given path, or `None` when it cannot
    /// be determined.
    fn resolve(&self, path: &Path) -> Option<String>;
}

/// Default resolver that maps file extensions to MIME types.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionMimeResolver;

impl MimeResolver for ExtensionMimeResolver {
    fn resolve(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}

/// Reads media files for scanning.
#[async_trait]
pub trait FileReader: Send + Sync + Debug {
    /// Reads the entire file into memory.
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Returns the file size in bytes, or `None` when it cannot be
    /// determined. Callers proceed without it and let the server infer the
    /// size from the contents.
    async fn size(&self, path: &Path) -> Option<u64>;
}

/// Default reader backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileReader;

#[async_trait]
impl FileReader for TokioFileReader {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn size(&self, path: &Path) -> Option<u64> {
        tokio::fs::metadata(path).await.ok().map(|meta| meta.len())
    }
}
