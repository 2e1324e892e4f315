//! Host render-tree boundary

use std::collections::HashMap;
use tableau_core::{NodeId, NodeProps, Viewport};

/// The slice of a host render tree the director and transitions need.
///
/// Child order is z-order: index 0 is drawn first (bottom).
pub trait RenderTree {
    /// Append `node` on top. A node already present is moved to the top.
    fn add_child(&mut self, node: NodeId);

    /// Insert `node` at `index` (clamped to the child count)
    fn add_child_at(&mut self, node: NodeId, index: usize);

    /// Returns false if `node` was not a child
    fn remove_child(&mut self, node: NodeId) -> bool;

    fn child_index(&self, node: NodeId) -> Option<usize>;

    fn swap_children_at(&mut self, a: usize, b: usize);

    fn child_count(&self) -> usize;

    fn props(&self, node: NodeId) -> Option<&NodeProps>;

    fn props_mut(&mut self, node: NodeId) -> Option<&mut NodeProps>;

    /// Extent used by move and scale transitions
    fn viewport(&self) -> Viewport;
}

/// In-memory render tree: an ordered child list plus per-node properties.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    children: Vec<NodeId>,
    props: HashMap<NodeId, NodeProps>,
    viewport: Viewport,
}

impl DisplayList {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            children: Vec::new(),
            props: HashMap::new(),
            viewport,
        }
    }

    /// Children bottom to top
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.children.contains(&node)
    }

    fn detach(&mut self, node: NodeId) -> bool {
        match self.children.iter().position(|&c| c == node) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl RenderTree for DisplayList {
    fn add_child(&mut self, node: NodeId) {
        self.detach(node);
        self.children.push(node);
        self.props.entry(node).or_default();
    }

    fn add_child_at(&mut self, node: NodeId, index: usize) {
        self.detach(node);
        let index = index.min(self.children.len());
        self.children.insert(index, node);
        self.props.entry(node).or_default();
    }

    fn remove_child(&mut self, node: NodeId) -> bool {
        let removed = self.detach(node);
        self.props.remove(&node);
        removed
    }

    fn child_index(&self, node: NodeId) -> Option<usize> {
        self.children.iter().position(|&c| c == node)
    }

    fn swap_children_at(&mut self, a: usize, b: usize) {
        if a < self.children.len() && b < self.children.len() {
            self.children.swap(a, b);
        }
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn props(&self, node: NodeId) -> Option<&NodeProps> {
        self.props.get(&node)
    }

    fn props_mut(&mut self, node: NodeId) -> Option<&mut NodeProps> {
        self.props.get_mut(&node)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
