use std::path::{Path, PathBuf};
use std::rc::Rc;

use redlilium_scene::{ComponentId, NodeId};
use redlilium_vfs::{FileSystemProvider, Vfs};
use serde::Deserialize;
use thiserror::Error;

use crate::dispatch::RequestDispatcher;
use crate::request::ProjectRequest;

/// Top-level project configuration loaded from `project.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub mount: Vec<MountConfig>,
}

/// General project information.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

/// A resource directory mounted into the project VFS.
///
/// Relative paths are resolved against the directory holding `project.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MountConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub default: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: ProjectInfo {
                name: "Untitled".into(),
            },
            mount: vec![MountConfig {
                name: "assets".into(),
                path: "./assets".into(),
                default: true,
            }],
        }
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load a project config from a TOML file.
pub fn load_project(path: &Path) -> Result<ProjectConfig, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ProjectError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Build a [`Vfs`] from a project config.
///
/// `base_dir` anchors relative mount paths. The first mount marked
/// `default = true` becomes the default source.
pub fn build_vfs(config: &ProjectConfig, base_dir: &Path) -> Vfs {
    let mut vfs = Vfs::new();

    for mount in &config.mount {
        let root = base_dir.join(&mount.path);
        if !root.is_dir() {
            log::warn!(
                "VFS mount \"{}\" points to missing directory {:?}",
                mount.name,
                root
            );
        }
        log::info!("VFS mount: \"{}\" -> {:?}", mount.name, root);
        vfs.mount(&mount.name, FileSystemProvider::new(root));
    }

    if let Some(default_mount) = config.mount.iter().find(|m| m.default) {
        vfs.set_default(&default_mount.name);
    }

    vfs
}

/// Load project config, falling back to the default if the file can't be used.
pub fn load_or_default(path: &Path) -> ProjectConfig {
    match load_project(path) {
        Ok(config) => {
            log::info!(
                "Loaded project: {} ({} mounts)",
                config.project.name,
                config.mount.len()
            );
            config
        }
        Err(e) => {
            log::warn!("No project file ({e}), using defaults");
            ProjectConfig::default()
        }
    }
}

/// An open project: its resource mounts and the request pathway.
#[derive(Debug)]
pub struct Project {
    config: ProjectConfig,
    vfs: Vfs,
    dispatcher: RequestDispatcher,
}

impl Project {
    pub fn new(config: ProjectConfig, base_dir: &Path) -> Self {
        let vfs = build_vfs(&config, base_dir);
        Self {
            config,
            vfs,
            dispatcher: RequestDispatcher::new(),
        }
    }

    /// Open the project described by a `project.toml` file.
    pub fn open(path: &Path) -> Result<Self, ProjectError> {
        let config = load_project(path)?;
        Ok(Self::new(config, project_dir(path)))
    }

    /// Like [`open()`](Self::open), but falls back to a default config.
    pub fn open_or_default(path: &Path) -> Self {
        Self::new(load_or_default(path), project_dir(path))
    }

    pub fn name(&self) -> &str {
        &self.config.project.name
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Listeners are registered here.
    pub fn dispatcher_mut(&mut self) -> &mut RequestDispatcher {
        &mut self.dispatcher
    }

    /// Send any request through the dispatcher.
    pub fn process_request(&self, request: ProjectRequest) -> Rc<ProjectRequest> {
        self.dispatcher.process(request)
    }

    pub fn request_open_resource(&self, resource_name: impl Into<String>) -> Rc<ProjectRequest> {
        self.process_request(ProjectRequest::open_resource(&self.vfs, resource_name))
    }

    pub fn request_inspect_resources<I, S>(&self, resource_names: I) -> Rc<ProjectRequest>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process_request(ProjectRequest::inspect_resources(&self.vfs, resource_names))
    }

    pub fn request_inspect_node_components<N, C>(
        &self,
        nodes: N,
        components: C,
    ) -> Rc<ProjectRequest>
    where
        N: IntoIterator,
        N::Item: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<ComponentId>>,
    {
        self.process_request(ProjectRequest::inspect_node_components(nodes, components))
    }
}

fn project_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_TOML: &str = r#"
[project]
name = "Sample"

[[mount]]
name = "core"
path = "CoreData"

[[mount]]
name = "game"
path = "Data"
default = true
"#;

    #[test]
    fn parses_config() {
        let config: ProjectConfig = toml::from_str(PROJECT_TOML).unwrap();
        assert_eq!(config.project.name, "Sample");
        assert_eq!(config.mount.len(), 2);
        assert!(!config.mount[0].default);
        assert!(config.mount[1].default);
    }

    #[test]
    fn mounts_are_optional() {
        let config: ProjectConfig = toml::from_str("[project]\nname = \"Empty\"\n").unwrap();
        assert!(config.mount.is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project(&dir.path().join("project.toml")).unwrap_err();
        assert!(matches!(err, ProjectError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        std::fs::write(&path, "[project\nname = 1").unwrap();
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Parse { .. }));
        assert!(err.to_string().contains("project.toml"));
    }

    #[test]
    fn fallback_config_has_default_assets_mount() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_default(&dir.path().join("project.toml"));
        assert_eq!(config.project.name, "Untitled");
        assert_eq!(config.mount[0].name, "assets");
        assert!(config.mount[0].default);
    }

    #[test]
    fn mounts_resolve_relative_to_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Data/Scenes")).unwrap();
        std::fs::write(dir.path().join("Data/Scenes/Main.xml"), "<scene/>").unwrap();
        std::fs::create_dir_all(dir.path().join("CoreData")).unwrap();
        std::fs::write(dir.path().join("CoreData/Default.json"), "{}").unwrap();
        let path = dir.path().join("project.toml");
        std::fs::write(&path, PROJECT_TOML).unwrap();

        let project = Project::open(&path).unwrap();
        assert_eq!(project.name(), "Sample");
        assert!(project.vfs().exists("Scenes/Main.xml"));
        assert!(project.vfs().exists("game/Scenes/Main.xml"));
        assert!(project.vfs().exists("core/Default.json"));
        assert!(!project.vfs().exists("Default.json"));
    }
}
