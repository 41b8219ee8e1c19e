use std::fs::File;
use std::path::PathBuf;

use crate::VfsError;

/// A storage backend that can map resource paths to files on disk.
///
/// Paths passed to a provider are already normalized by the [`Vfs`](crate::Vfs)
/// and have the mount name stripped, so they are relative to the provider root.
pub trait VfsProvider: Send + Sync + 'static {
    /// Return the filesystem path of an existing file, or `None`.
    fn resolve(&self, path: &str) -> Option<PathBuf>;

    /// Whether a file exists at the given path.
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// Open a fresh read handle to the file.
    fn open(&self, path: &str) -> Result<File, VfsError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))?;
        Ok(File::open(full_path)?)
    }

    /// Read the entire file into memory.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))?;
        Ok(std::fs::read(full_path)?)
    }
}
