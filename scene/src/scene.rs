use crate::id::{ComponentId, NodeId};
use crate::slots::Slots;

/// A named node in the scene hierarchy.
#[derive(Debug)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<ComponentId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }
}

/// A component attached to exactly one node.
#[derive(Debug)]
pub struct Component {
    type_name: String,
    node: NodeId,
}

impl Component {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The node this component is attached to.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Owns every node and component, and decides whether a handle is still alive.
pub struct Scene {
    nodes: Slots<Node>,
    components: Slots<Component>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Slots::new(),
            components: Slots::new(),
        }
    }

    /// Create a root node.
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.insert_node(name.into(), None)
    }

    /// Create a node under `parent`. Returns `None` if the parent is gone.
    pub fn create_child(&mut self, parent: NodeId, name: impl Into<String>) -> Option<NodeId> {
        if !self.contains_node(parent) {
            return None;
        }
        let child = self.insert_node(name.into(), Some(parent));
        self.node_mut(parent)?.children.push(child);
        Some(child)
    }

    /// Attach a new component to `node`. Returns `None` if the node is gone.
    pub fn create_component(
        &mut self,
        node: NodeId,
        type_name: impl Into<String>,
    ) -> Option<ComponentId> {
        if !self.contains_node(node) {
            return None;
        }
        let (index, generation) = self.components.insert(Component {
            type_name: type_name.into(),
            node,
        });
        let id = ComponentId::new(index, generation);
        self.node_mut(node)?.components.push(id);
        Some(id)
    }

    /// Remove a node together with its whole subtree and all attached components.
    ///
    /// Returns `false` if the node was already gone.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(root) = self.nodes.remove(id.index(), id.generation()) else {
            return false;
        };

        if let Some(parent) = root.parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }

        let mut removed_nodes = 1;
        let mut removed_components = 0;
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            for component in node.components {
                if self
                    .components
                    .remove(component.index(), component.generation())
                    .is_some()
                {
                    removed_components += 1;
                }
            }
            for child in node.children {
                if let Some(child) = self.nodes.remove(child.index(), child.generation()) {
                    removed_nodes += 1;
                    pending.push(child);
                }
            }
        }

        log::debug!(
            "Removed {id:?}: {removed_nodes} node(s), {removed_components} component(s)"
        );
        true
    }

    /// Detach and destroy a single component.
    pub fn remove_component(&mut self, id: ComponentId) -> bool {
        let Some(component) = self.components.remove(id.index(), id.generation()) else {
            return false;
        };
        if let Some(node) = self.node_mut(component.node) {
            node.components.retain(|c| *c != id);
        }
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index(), id.generation())
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index(), id.generation())
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_component(&self, id: ComponentId) -> bool {
        self.component(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Iterate over all alive nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .map(|(index, generation, node)| (NodeId::new(index, generation), node))
    }

    fn insert_node(&mut self, name: String, parent: Option<NodeId>) -> NodeId {
        let (index, generation) = self.nodes.insert(Node {
            name,
            parent,
            children: Vec::new(),
            components: Vec::new(),
        });
        NodeId::new(index, generation)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index(), id.generation())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.node_count())
            .field("components", &self.component_count())
            .finish()
    }
}
