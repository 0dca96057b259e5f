//! Page Events
//!
//! User interaction events dispatched at document nodes.

use crate::NodeId;

/// Event kinds the recorder can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DblClick,
    MouseDown,
    MouseUp,
    ContextMenu,
    Change,
    Input,
    KeyDown,
    Focus,
    Blur,
    DragStart,
    Drop,
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct PageEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// New value, for change/input events
    pub value: Option<String>,
    /// Key name, for keyboard events
    pub key: Option<String>,
}

impl PageEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            value: None,
            key: None,
        }
    }

    pub fn with_value(kind: EventKind, target: NodeId, value: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            value: Some(value.into()),
            key: None,
        }
    }

    pub fn key_down(target: NodeId, key: impl Into<String>) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            value: None,
            key: Some(key.into()),
        }
    }
}
