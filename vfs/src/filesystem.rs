use std::path::PathBuf;

use crate::provider::VfsProvider;

/// Provider backed by a directory on the native filesystem.
///
/// The directory does not need to exist when the provider is created; names
/// simply fail to resolve until it does.
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl VfsProvider for FileSystemProvider {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let full_path = self.root.join(path);
        full_path.is_file().then_some(full_path)
    }
}
