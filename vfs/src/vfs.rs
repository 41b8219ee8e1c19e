use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::VfsError;
use crate::path;
use crate::provider::VfsProvider;

/// Routes resource names to mounted providers.
///
/// Names are structured as `"mount_name/rest/of/path"`. The first segment
/// selects the provider. If no mount matches, the default mount (if set)
/// receives the full name.
///
/// `Clone` is cheap (Arc internals).
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

struct VfsInner {
    sources: HashMap<String, Box<dyn VfsProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    /// Create an empty VFS with no mounted sources.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                sources: HashMap::new(),
                default_source: None,
            }),
        }
    }

    /// Mount a provider under the given name, replacing any previous one.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned. All mounting must
    /// happen while the project is being configured.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl VfsProvider) {
        let inner = Arc::get_mut(&mut self.inner).expect("cannot mount after Vfs has been cloned");
        inner.sources.insert(name.into(), Box::new(provider));
    }

    /// Set the mount that receives names matching no other mount.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned.
    pub fn set_default(&mut self, name: impl Into<String>) {
        let inner =
            Arc::get_mut(&mut self.inner).expect("cannot set default after Vfs has been cloned");
        inner.default_source = Some(name.into());
    }

    /// Names of all mounted sources, sorted.
    pub fn mount_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inner.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a resource name to the path of an existing file.
    pub fn resolve_file_name(&self, resource_name: &str) -> Result<PathBuf, VfsError> {
        let (provider, path) = self.route(resource_name)?;
        provider
            .resolve(&path)
            .ok_or_else(|| VfsError::NotFound(resource_name.to_owned()))
    }

    /// Whether a file exists for the resource name.
    ///
    /// Names that cannot be routed simply do not exist.
    pub fn exists(&self, resource_name: &str) -> bool {
        match self.route(resource_name) {
            Ok((provider, path)) => provider.exists(&path),
            Err(_) => false,
        }
    }

    /// Open a fresh read handle for the resource.
    pub fn open(&self, resource_name: &str) -> Result<File, VfsError> {
        let (provider, path) = self.route(resource_name)?;
        provider.open(&path)
    }

    /// Read the entire resource into memory.
    pub fn read(&self, resource_name: &str) -> Result<Vec<u8>, VfsError> {
        let (provider, path) = self.route(resource_name)?;
        provider.read(&path)
    }

    /// Pick the provider for a name and the path within that provider.
    fn route(&self, resource_name: &str) -> Result<(&dyn VfsProvider, String), VfsError> {
        let normalized = path::normalize(resource_name)?;
        let (source, rest) = path::split_source(&normalized);

        if let Some(provider) = self.inner.sources.get(source) {
            return Ok((provider.as_ref(), rest.to_owned()));
        }

        if let Some(default_name) = &self.inner.default_source
            && let Some(provider) = self.inner.sources.get(default_name)
        {
            return Ok((provider.as_ref(), normalized));
        }

        log::trace!("No mount for resource \"{resource_name}\"");
        Err(VfsError::NoSuchSource(source.to_owned()))
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vfs")
            .field("mounts", &self.mount_names())
            .field("default", &self.inner.default_source)
            .finish()
    }
}
