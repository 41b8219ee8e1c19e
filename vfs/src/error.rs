use thiserror::Error;

/// Errors that can occur while resolving or opening a resource.
#[derive(Debug, Error)]
pub enum VfsError {
    /// No file exists for the resource name.
    #[error("not found: {0}")]
    NotFound(String),
    /// The file exists but could not be opened or read.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// The name is empty, contains `..`, or fails normalization otherwise.
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// No mount matches the name and no default mount is set.
    #[error("no such source: {0}")]
    NoSuchSource(String),
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            VfsError::NotFound(err.to_string())
        } else {
            VfsError::Io(err)
        }
    }
}
