//! wrec DOM
//!
//! Document model the recorder attaches to: an arena node tree with
//! shadow roots, per-target listener tables, page events and mutation
//! observers.
//!
//! This is not a rendering DOM. It models exactly what listener
//! attachment and frame resolution need: live child lists, shadow
//! subtrees as separate listener targets, and exact add/remove
//! bookkeeping.

mod document;
mod events;
mod listeners;
mod node;
mod observer;
mod shadow;
mod tree;

pub use document::Document;
pub use events::{EventKind, PageEvent};
pub use listeners::{ListenerCallback, ListenerId, ListenerKey, ListenerTable, ListenerTarget};
pub use node::{ElementData, Node, NodeData, TRACKED_INPUT_TYPES};
pub use observer::{
    MutationKind, MutationRecord, ObserverCallback, ObserverConfig, ObserverId,
};
pub use shadow::{ShadowId, ShadowRoot};
pub use tree::DomTree;

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node not found")]
    NotFound,
    #[error("hierarchy request error")]
    HierarchyRequest,
    #[error("node is not an element")]
    NotAnElement,
    #[error("node is not a child")]
    NotAChild,
    #[error("invalid node type")]
    InvalidNodeType,
}
