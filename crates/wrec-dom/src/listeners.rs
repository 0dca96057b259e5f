//! Listener Table
//!
//! Bookkeeping for attached event listeners, keyed by listener target
//! and (event, capture). Every attached instance has a unique id so a
//! lifecycle can later take out exactly what it put in.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{Document, EventKind, NodeId, PageEvent, ShadowId};

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document itself
    Document,
    /// A shadow root
    Shadow(ShadowId),
    /// A single element (focus/blur tracking)
    Element(NodeId),
}

/// (event, capture) listener key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    pub event: EventKind,
    pub capture: bool,
}

impl ListenerKey {
    pub fn new(event: EventKind, capture: bool) -> Self {
        Self { event, capture }
    }

    pub fn capturing(event: EventKind) -> Self {
        Self::new(event, true)
    }

    pub fn bubbling(event: EventKind) -> Self {
        Self::new(event, false)
    }
}

/// Unique id of one attached listener instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked on dispatch; reads the document, never mutates it
pub type ListenerCallback = Rc<dyn Fn(&Document, &PageEvent)>;

pub(crate) struct ListenerEntry {
    pub id: ListenerId,
    pub callback: ListenerCallback,
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerEntry").field("id", &self.id).finish()
    }
}

/// Per-document listener bookkeeping
#[derive(Debug, Default)]
pub struct ListenerTable {
    entries: HashMap<(ListenerTarget, ListenerKey), Vec<ListenerEntry>>,
    next_id: u64,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach one listener instance under the given key
    pub fn add(
        &mut self,
        target: ListenerTarget,
        key: ListenerKey,
        callback: ListenerCallback,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries
            .entry((target, key))
            .or_default()
            .push(ListenerEntry { id, callback });
        id
    }

    /// Remove one instance under the identical key. Unknown ids are
    /// ignored so double-removal stays harmless.
    pub fn remove(&mut self, target: ListenerTarget, key: ListenerKey, id: ListenerId) -> bool {
        let Some(entries) = self.entries.get_mut(&(target, key)) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.entries.remove(&(target, key));
        }
        removed
    }

    /// Snapshot of callbacks under one key, in attach order
    pub(crate) fn callbacks(&self, target: ListenerTarget, key: ListenerKey) -> Vec<ListenerCallback> {
        self.entries
            .get(&(target, key))
            .map(|entries| entries.iter().map(|e| e.callback.clone()).collect())
            .unwrap_or_default()
    }

    /// Instances under one key
    pub fn count(&self, target: ListenerTarget, key: ListenerKey) -> usize {
        self.entries.get(&(target, key)).map_or(0, Vec::len)
    }

    /// Instances on one target across all keys
    pub fn count_on(&self, target: ListenerTarget) -> usize {
        self.entries
            .iter()
            .filter(|((t, _), _)| *t == target)
            .map(|(_, entries)| entries.len())
            .sum()
    }

    /// All attached instances
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets that currently hold at least one listener
    pub fn targets(&self) -> Vec<ListenerTarget> {
        let mut targets: Vec<ListenerTarget> =
            self.entries.keys().map(|(target, _)| *target).collect();
        targets.sort_by_key(|t| match t {
            ListenerTarget::Document => (0, 0),
            ListenerTarget::Shadow(id) => (1, id.index()),
            ListenerTarget::Element(id) => (2, id.index()),
        });
        targets.dedup();
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> ListenerCallback {
        Rc::new(|_, _| {})
    }

    #[test]
    fn test_add_remove_symmetry() {
        let mut table = ListenerTable::new();
        let key = ListenerKey::capturing(EventKind::Click);

        let a = table.add(ListenerTarget::Document, key, noop());
        let b = table.add(ListenerTarget::Document, key, noop());
        assert_eq!(table.count(ListenerTarget::Document, key), 2);

        assert!(table.remove(ListenerTarget::Document, key, a));
        assert!(table.remove(ListenerTarget::Document, key, b));
        assert!(table.is_empty());
    }

    #[test]
    fn test_double_remove_is_harmless() {
        let mut table = ListenerTable::new();
        let key = ListenerKey::bubbling(EventKind::Change);

        let id = table.add(ListenerTarget::Document, key, noop());
        assert!(table.remove(ListenerTarget::Document, key, id));
        assert!(!table.remove(ListenerTarget::Document, key, id));
    }

    #[test]
    fn test_removal_requires_identical_key() {
        let mut table = ListenerTable::new();
        let capturing = ListenerKey::capturing(EventKind::Click);
        let bubbling = ListenerKey::bubbling(EventKind::Click);

        let id = table.add(ListenerTarget::Document, capturing, noop());
        assert!(!table.remove(ListenerTarget::Document, bubbling, id));
        assert_eq!(table.total(), 1);
    }
}
