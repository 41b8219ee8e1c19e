use std::fmt;

/// Non-owning handle to a scene node.
///
/// Ordered by `(index, generation)`. The order is stable and deterministic
/// but carries no meaning beyond identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of the node.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}@{})", self.index, self.generation)
    }
}

/// Non-owning handle to a component attached to a scene node.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId {
    index: u32,
    generation: u32,
}

impl ComponentId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({}@{})", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_index_then_generation() {
        let mut ids = vec![NodeId::new(2, 0), NodeId::new(0, 3), NodeId::new(0, 1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![NodeId::new(0, 1), NodeId::new(0, 3), NodeId::new(2, 0)]
        );
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", NodeId::new(4, 2)), "Node(4@2)");
        assert_eq!(format!("{:?}", ComponentId::new(1, 0)), "Component(1@0)");
    }
}
