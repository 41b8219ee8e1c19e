//! Project-wide requests issued by editor UI code.
//!
//! A [`ProjectRequest`] carries an immutable payload describing what the user
//! asked for, plus a [`CallbackQueue`] where interested subsystems register
//! their reactions. The issuer then runs the single highest-priority reaction.
//! Requests are meant for the main thread only.

use std::ops::Deref;

use redlilium_scene::{ComponentId, NodeId, Scene};
use redlilium_vfs::Vfs;

use crate::callback_queue::{Callback, CallbackQueue};
use crate::resource_desc::FileResourceDesc;

/// Request to open a single resource.
#[derive(Debug)]
pub struct OpenResourceRequest {
    resource: FileResourceDesc,
}

impl OpenResourceRequest {
    pub fn new(vfs: &Vfs, resource_name: impl Into<String>) -> Self {
        Self {
            resource: FileResourceDesc::new(vfs, resource_name),
        }
    }

    pub fn resource(&self) -> &FileResourceDesc {
        &self.resource
    }
}

impl Deref for OpenResourceRequest {
    type Target = FileResourceDesc;

    fn deref(&self) -> &FileResourceDesc {
        &self.resource
    }
}

/// Request to inspect one or more resources.
#[derive(Debug)]
pub struct InspectResourceRequest {
    resources: Vec<FileResourceDesc>,
}

impl InspectResourceRequest {
    /// One descriptor per name, in the order given.
    pub fn new<I, S>(vfs: &Vfs, resource_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resources: resource_names
                .into_iter()
                .map(|name| FileResourceDesc::new(vfs, name))
                .collect(),
        }
    }

    pub fn resources(&self) -> &[FileResourceDesc] {
        &self.resources
    }

    /// Resource names sorted for display. Computed on every call.
    pub fn sorted_resource_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resources
            .iter()
            .map(|resource| resource.resource_name().to_owned())
            .collect();
        names.sort();
        names
    }
}

/// Request to inspect scene nodes and/or components.
///
/// Holds handles only. A node or component removed from the scene after the
/// request was built is skipped by [`alive_nodes()`](Self::alive_nodes) and
/// [`alive_components()`](Self::alive_components).
#[derive(Debug, Default)]
pub struct InspectNodeComponentRequest {
    nodes: Vec<NodeId>,
    components: Vec<ComponentId>,
}

impl InspectNodeComponentRequest {
    /// Accepts bare ids or `Option`s; `None` entries are dropped.
    ///
    /// The surviving handles are sorted by identity and deduplicated, so the
    /// result does not depend on input order.
    pub fn new<N, C>(nodes: N, components: C) -> Self
    where
        N: IntoIterator,
        N::Item: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<ComponentId>>,
    {
        Self {
            nodes: canonical(nodes),
            components: canonical(components),
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Nodes that still exist in `scene`.
    pub fn alive_nodes<'a>(&'a self, scene: &'a Scene) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .copied()
            .filter(|node| scene.contains_node(*node))
    }

    /// Components that still exist in `scene`.
    pub fn alive_components<'a>(
        &'a self,
        scene: &'a Scene,
    ) -> impl Iterator<Item = ComponentId> + 'a {
        self.components
            .iter()
            .copied()
            .filter(|component| scene.contains_component(*component))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.components.is_empty()
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }
}

fn canonical<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator,
    I::Item: Into<Option<T>>,
    T: Ord,
{
    let mut handles: Vec<T> = items.into_iter().filter_map(|item| item.into()).collect();
    handles.sort_unstable();
    handles.dedup();
    handles
}

/// The payload of a [`ProjectRequest`].
#[derive(Debug)]
pub enum RequestKind {
    OpenResource(OpenResourceRequest),
    InspectResource(InspectResourceRequest),
    InspectNodeComponent(InspectNodeComponentRequest),
}

impl RequestKind {
    /// Short label used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RequestKind::OpenResource(_) => "OpenResource",
            RequestKind::InspectResource(_) => "InspectResource",
            RequestKind::InspectNodeComponent(_) => "InspectNodeComponent",
        }
    }
}

/// A user intent plus the callbacks registered in response to it.
#[derive(Debug)]
pub struct ProjectRequest {
    kind: RequestKind,
    callbacks: CallbackQueue,
}

impl ProjectRequest {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            callbacks: CallbackQueue::new(),
        }
    }

    pub fn open_resource(vfs: &Vfs, resource_name: impl Into<String>) -> Self {
        Self::new(RequestKind::OpenResource(OpenResourceRequest::new(
            vfs,
            resource_name,
        )))
    }

    pub fn inspect_resources<I, S>(vfs: &Vfs, resource_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RequestKind::InspectResource(InspectResourceRequest::new(
            vfs,
            resource_names,
        )))
    }

    pub fn inspect_node_components<N, C>(nodes: N, components: C) -> Self
    where
        N: IntoIterator,
        N::Item: Into<Option<NodeId>>,
        C: IntoIterator,
        C::Item: Into<Option<ComponentId>>,
    {
        Self::new(RequestKind::InspectNodeComponent(
            InspectNodeComponentRequest::new(nodes, components),
        ))
    }

    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn as_open_resource(&self) -> Option<&OpenResourceRequest> {
        match &self.kind {
            RequestKind::OpenResource(request) => Some(request),
            _ => None,
        }
    }

    pub fn as_inspect_resource(&self) -> Option<&InspectResourceRequest> {
        match &self.kind {
            RequestKind::InspectResource(request) => Some(request),
            _ => None,
        }
    }

    pub fn as_inspect_node_component(&self) -> Option<&InspectNodeComponentRequest> {
        match &self.kind {
            RequestKind::InspectNodeComponent(request) => Some(request),
            _ => None,
        }
    }

    /// Register a reaction to this request.
    pub fn queue_process_callback(&self, callback: Callback, priority: i32) {
        self.callbacks.queue(callback, priority);
    }

    /// Register a reaction with [`DEFAULT_PRIORITY`](crate::DEFAULT_PRIORITY).
    pub fn queue_process_callback_default(&self, callback: Callback) {
        self.callbacks.queue_default(callback);
    }

    /// Run the highest-priority reaction. Returns `false` if none was queued.
    pub fn invoke_process_callback(&self) -> bool {
        self.callbacks.invoke_highest()
    }

    /// Number of reactions still waiting to run.
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }
}
