//! Mutation Observers
//!
//! Observe tree changes per listener target. An observer instance is
//! bound to exactly one target; records are routed synchronously as
//! mutations happen.

use std::fmt;
use std::rc::Rc;

use crate::{ListenerTarget, NodeId};

/// Mutation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Attributes,
    CharacterData,
    ChildList,
}

/// Mutation record
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub kind: MutationKind,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub attribute_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl MutationRecord {
    pub(crate) fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added_nodes: added,
            removed_nodes: removed,
            attribute_name: None,
            old_value: None,
            new_value: None,
        }
    }

    pub(crate) fn attribute(
        target: NodeId,
        name: &str,
        old_value: Option<String>,
        new_value: &str,
    ) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: Some(name.to_string()),
            old_value,
            new_value: Some(new_value.to_string()),
        }
    }

    pub(crate) fn character_data(target: NodeId, old_value: String, new_value: &str) -> Self {
        Self {
            kind: MutationKind::CharacterData,
            target,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            attribute_name: None,
            old_value: Some(old_value),
            new_value: Some(new_value.to_string()),
        }
    }
}

/// Mutation observer options
#[derive(Debug, Clone, Default)]
pub struct ObserverConfig {
    pub child_list: bool,
    pub attributes: bool,
    pub character_data: bool,
    pub subtree: bool,
    pub attribute_old_value: bool,
    pub attribute_filter: Option<Vec<String>>,
}

impl ObserverConfig {
    /// Does this config care about the given record?
    pub(crate) fn matches(&self, record: &MutationRecord) -> bool {
        let kind_ok = match record.kind {
            MutationKind::Attributes => self.attributes,
            MutationKind::CharacterData => self.character_data,
            MutationKind::ChildList => self.child_list,
        };
        if !kind_ok {
            return false;
        }
        if record.kind == MutationKind::Attributes {
            if let (Some(filter), Some(name)) = (&self.attribute_filter, &record.attribute_name) {
                return filter.iter().any(|f| f == name);
            }
        }
        true
    }
}

/// Unique id of one observer instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn new(raw: u64) -> Self {
        ObserverId(raw)
    }
}

/// Callback receiving routed records
pub type ObserverCallback = Rc<dyn Fn(&[MutationRecord])>;

pub(crate) struct ActiveObserver {
    pub id: ObserverId,
    pub target: ListenerTarget,
    pub config: ObserverConfig,
    pub callback: ObserverCallback,
}

impl fmt::Debug for ActiveObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveObserver")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("config", &self.config)
            .finish()
    }
}
