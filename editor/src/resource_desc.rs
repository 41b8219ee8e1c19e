//! File-backed resource descriptors.

use std::cell::OnceCell;
use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};

use redlilium_vfs::Vfs;

/// A parsed XML resource.
#[derive(Debug, Clone)]
pub struct XmlFile {
    root: xmltree::Element,
}

impl XmlFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, xmltree::ParseError> {
        Ok(Self {
            root: xmltree::Element::parse(bytes)?,
        })
    }

    pub fn root(&self) -> &xmltree::Element {
        &self.root
    }

    /// Qualified tag name of the root element, prefix included (`ur:scene`).
    pub fn root_name(&self) -> String {
        match &self.root.prefix {
            Some(prefix) => format!("{prefix}:{}", self.root.name),
            None => self.root.name.clone(),
        }
    }

    /// Root tag name without its namespace prefix.
    pub fn root_local_name(&self) -> &str {
        &self.root.name
    }
}

/// A parsed JSON resource.
#[derive(Debug, Clone)]
pub struct JsonFile {
    root: serde_json::Value,
}

impl JsonFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(Self {
            root: serde_json::from_slice(bytes)?,
        })
    }

    pub fn root(&self) -> &serde_json::Value {
        &self.root
    }
}

/// Describes a named resource and the file behind it, if any.
///
/// The file name is resolved once, on construction. Structured views are
/// parsed on first access and kept for the lifetime of the descriptor; a
/// descriptor never notices later changes on disk; build a new one instead.
/// Every accessor fails softly with `None` or an empty string.
#[derive(Debug, Default)]
pub struct FileResourceDesc {
    /// Context the name was resolved against, handed on to consumers that
    /// need to look up related resources. File access goes through `file_name`.
    vfs: Option<Vfs>,
    resource_name: String,
    file_name: Option<PathBuf>,
    xml_file: OnceCell<Option<XmlFile>>,
    json_file: OnceCell<Option<JsonFile>>,
}

impl FileResourceDesc {
    /// Describe `resource_name`, resolving its file through `vfs`.
    ///
    /// A name that does not resolve still yields a descriptor; it just
    /// reports [`is_valid_file()`](Self::is_valid_file) as `false`.
    pub fn new(vfs: &Vfs, resource_name: impl Into<String>) -> Self {
        let resource_name = resource_name.into();
        let file_name = match vfs.resolve_file_name(&resource_name) {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("Resource \"{resource_name}\" has no file: {e}");
                None
            }
        };

        Self {
            vfs: Some(vfs.clone()),
            resource_name,
            file_name,
            xml_file: OnceCell::new(),
            json_file: OnceCell::new(),
        }
    }

    /// The VFS the name was resolved against. `None` for default descriptors.
    pub fn vfs(&self) -> Option<&Vfs> {
        self.vfs.as_ref()
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Resolved filesystem path, or `None` if the resource has no file.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn is_valid_file(&self) -> bool {
        self.file_name.is_some()
    }

    /// Open a new read handle to the file. Not cached.
    pub fn binary_file(&self) -> Option<File> {
        let file_name = self.file_name.as_deref()?;
        match File::open(file_name) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("Failed to open {}: {e}", file_name.display());
                None
            }
        }
    }

    /// The file parsed as XML, parsed on first call.
    pub fn xml_file(&self) -> Option<&XmlFile> {
        self.xml_file
            .get_or_init(|| self.parse_file("XML", XmlFile::parse))
            .as_ref()
    }

    /// The file parsed as JSON, parsed on first call.
    pub fn json_file(&self) -> Option<&JsonFile> {
        self.json_file
            .get_or_init(|| self.parse_file("JSON", JsonFile::parse))
            .as_ref()
    }

    /// Case-insensitive suffix match on the resource name.
    pub fn has_extension(&self, extension: &str) -> bool {
        ends_with_ignore_case(&self.resource_name, extension)
    }

    /// Whether the resource name ends with any of the given extensions.
    pub fn has_any_extension<I, S>(&self, extensions: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extensions
            .into_iter()
            .any(|extension| self.has_extension(extension.as_ref()))
    }

    /// Best-effort hint about what the file contains.
    ///
    /// The root element name for XML files, empty for everything else.
    pub fn type_hint(&self) -> String {
        self.xml_file()
            .map(XmlFile::root_name)
            .unwrap_or_default()
    }

    fn parse_file<T, E: Display>(
        &self,
        format: &str,
        parse: impl FnOnce(&[u8]) -> Result<T, E>,
    ) -> Option<T> {
        let file_name = self.file_name.as_deref()?;
        let bytes = match std::fs::read(file_name) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", file_name.display());
                return None;
            }
        };
        match parse(&bytes) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::debug!("\"{}\" is not valid {format}: {e}", self.resource_name);
                None
            }
        }
    }
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len()
        .checked_sub(suffix.len())
        .and_then(|start| name.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
