//! DOM Tree (arena-based)
//!
//! Nodes and shadow roots live in flat arenas; ids stay valid for the
//! document's lifetime. Reads on unknown ids degrade to "nothing
//! there", never to a panic.

use crate::{ListenerTarget, Node, NodeId, ShadowId, ShadowRoot};

/// Arena of nodes and shadow roots
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    shadows: Vec<ShadowRoot>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Get a shadow root by ID
    pub fn shadow(&self, id: ShadowId) -> Option<&ShadowRoot> {
        self.shadows.get(id.index())
    }

    pub(crate) fn shadow_mut(&mut self, id: ShadowId) -> Option<&mut ShadowRoot> {
        self.shadows.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of shadow roots
    pub fn shadow_count(&self) -> usize {
        self.shadows.len()
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn insert_shadow(&mut self, shadow: ShadowRoot) -> ShadowId {
        let id = ShadowId::from_index(self.shadows.len());
        self.shadows.push(shadow);
        id
    }

    /// Live child list; unknown nodes read as no children
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Root listener target the node currently lives under
    pub fn root_target(&self, id: NodeId) -> ListenerTarget {
        self.get(id).map(|n| n.root).unwrap_or(ListenerTarget::Document)
    }

    /// Iterate all nodes in arena (creation) order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }
}
