//! Document
//!
//! One rendering context's element tree plus the listener and observer
//! bookkeeping a recorder works against.
//!
//! Dispatch is two-level: an event fired at a node runs capturing
//! listeners of the node's root target, then listeners attached to the
//! element itself, then non-capturing root listeners. Crossing a shadow
//! boundary changes the root target, so listeners attached to the
//! document never see events originating inside a shadow subtree.

use crate::observer::ActiveObserver;
use crate::{
    DomError, DomResult, DomTree, ElementData, ListenerCallback, ListenerId, ListenerKey,
    ListenerTable, ListenerTarget, MutationKind, MutationRecord, Node, NodeId, ObserverCallback,
    ObserverConfig, ObserverId, PageEvent, ShadowId, ShadowRoot,
};

/// A rendering context's document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    body: NodeId,
    listeners: ListenerTable,
    observers: Vec<ActiveObserver>,
    next_observer: u64,
}

impl Document {
    /// Create a document holding only a body element
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let body = tree.insert(Node::element(ElementData::new("body")));
        Self {
            tree,
            body,
            listeners: ListenerTable::new(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// The body element every traversal starts from
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Access the node tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    // --- structure ---

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.insert(Node::element(ElementData::new(tag)))
    }

    /// Create a detached input element with a type and initial value
    pub fn create_input(&mut self, input_type: &str, value: &str) -> NodeId {
        let mut data = ElementData::new("input");
        data.input_type = Some(input_type.to_string());
        data.value = Some(value.to_string());
        self.tree.insert(Node::element(data))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.insert(Node::text(content.to_string()))
    }

    /// Append a detached node under a parent element
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.tree.get(parent).ok_or(DomError::NotFound)?;
        if !parent_node.is_element() {
            return Err(DomError::NotAnElement);
        }
        let root = parent_node.root;
        let child_node = self.tree.get(child).ok_or(DomError::NotFound)?;
        if child == parent || child_node.parent.is_valid() {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        if let Some(node) = self.tree.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.tree.get_mut(child) {
            node.parent = parent;
        }
        self.set_root(child, root);

        self.deliver(root, MutationRecord::child_list(parent, vec![child], vec![]));
        Ok(())
    }

    /// Append a detached node directly under a shadow root
    pub fn append_shadow_child(&mut self, shadow: ShadowId, child: NodeId) -> DomResult<()> {
        let host = self.tree.shadow(shadow).ok_or(DomError::NotFound)?.host;
        let child_node = self.tree.get(child).ok_or(DomError::NotFound)?;
        if child_node.parent.is_valid() {
            return Err(DomError::HierarchyRequest);
        }

        if let Some(root) = self.tree.shadow_mut(shadow) {
            root.append_child(child);
        }
        if let Some(node) = self.tree.get_mut(child) {
            node.parent = host;
        }
        self.set_root(child, ListenerTarget::Shadow(shadow));

        let scope = ListenerTarget::Shadow(shadow);
        self.deliver(scope, MutationRecord::child_list(host, vec![child], vec![]));
        Ok(())
    }

    /// Remove a child from its parent element or the parent's shadow root
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.tree.get(parent).ok_or(DomError::NotFound)?;
        let root = parent_node.root;
        let in_light = parent_node.children.contains(&child);

        if in_light {
            if let Some(node) = self.tree.get_mut(parent) {
                node.children.retain(|&c| c != child);
            }
            if let Some(node) = self.tree.get_mut(child) {
                node.parent = NodeId::NONE;
            }
            self.deliver(root, MutationRecord::child_list(parent, vec![], vec![child]));
            return Ok(());
        }

        // not a light child; it may sit in the parent's shadow root
        let shadow = self
            .tree
            .get(parent)
            .and_then(|n| n.as_element())
            .and_then(|e| e.shadow);
        if let Some(shadow) = shadow {
            let removed = self
                .tree
                .shadow_mut(shadow)
                .map(|root| root.remove_child(child))
                .unwrap_or(false);
            if removed {
                if let Some(node) = self.tree.get_mut(child) {
                    node.parent = NodeId::NONE;
                }
                let scope = ListenerTarget::Shadow(shadow);
                self.deliver(scope, MutationRecord::child_list(parent, vec![], vec![child]));
                return Ok(());
            }
        }
        Err(DomError::NotAChild)
    }

    /// Attach a shadow root to an element. Re-attaching returns the
    /// existing root.
    pub fn attach_shadow(&mut self, host: NodeId) -> DomResult<ShadowId> {
        let node = self.tree.get(host).ok_or(DomError::NotFound)?;
        let element = node.as_element().ok_or(DomError::NotAnElement)?;
        if let Some(existing) = element.shadow {
            return Ok(existing);
        }

        let shadow = self.tree.insert_shadow(ShadowRoot::new(host));
        if let Some(element) = self.tree.get_mut(host).and_then(Node::as_element_mut) {
            element.shadow = Some(shadow);
        }
        Ok(shadow)
    }

    /// Live child list of an element
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.tree.children(node)
    }

    /// Live child list of a shadow root
    pub fn shadow_children(&self, shadow: ShadowId) -> &[NodeId] {
        self.tree
            .shadow(shadow)
            .map(ShadowRoot::children)
            .unwrap_or(&[])
    }

    /// Shadow root hosted by an element, if any
    pub fn shadow_id(&self, host: NodeId) -> Option<ShadowId> {
        self.tree.get(host)?.as_element()?.shadow
    }

    /// Parent of a node, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.tree.get(node)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.tree.get(node)?.as_element()
    }

    /// Current input value of an element
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node)?.value.as_deref()
    }

    /// Convenience: set the cached id attribute
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(element) = self.tree.get_mut(node).and_then(Node::as_element_mut) {
            element.id = Some(id.to_string());
        }
    }

    /// Set an attribute, routing id/value to their cached fields
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let scope = self.tree.root_target(node);
        let element = self
            .tree
            .get_mut(node)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement)?;
        let old = match name {
            "id" => element.id.replace(value.to_string()),
            "value" => element.value.replace(value.to_string()),
            _ => element.set_attr(name, value),
        };
        self.deliver(scope, MutationRecord::attribute(node, name, old, value));
        Ok(())
    }

    /// Programmatic value change; observers see it as a `value`
    /// attribute mutation, which is how it is told apart from typing
    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.set_attr(node, "value", value)
    }

    /// Replace a text node's content
    pub fn set_text(&mut self, node: NodeId, content: &str) -> DomResult<()> {
        let scope = self.tree.root_target(node);
        let text = self.tree.get_mut(node).ok_or(DomError::NotFound)?;
        let old = match &mut text.data {
            crate::NodeData::Text(t) => std::mem::replace(t, content.to_string()),
            _ => return Err(DomError::InvalidNodeType),
        };
        self.deliver(scope, MutationRecord::character_data(node, old, content));
        Ok(())
    }

    /// Every attached input-like element, in creation order
    pub fn tracked_inputs(&self) -> Vec<NodeId> {
        self.tree
            .iter()
            .filter(|(id, node)| {
                node.as_element()
                    .is_some_and(ElementData::is_tracked_input)
                    && self.is_attached(*id)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Does an ascent from `node` reach the body?
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        for _ in 0..=self.tree.len() {
            if current == self.body {
                return true;
            }
            match self.tree.get(current).map(|n| n.parent) {
                Some(parent) if parent.is_valid() => current = parent,
                _ => return false,
            }
        }
        false
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = node;
        for _ in 0..=self.tree.len() {
            if current == candidate {
                return true;
            }
            match self.tree.get(current).map(|n| n.parent) {
                Some(parent) if parent.is_valid() => current = parent,
                _ => return false,
            }
        }
        false
    }

    /// Re-home a subtree under a new root target, light children only:
    /// nested shadow subtrees keep their own target
    fn set_root(&mut self, node: NodeId, root: ListenerTarget) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(n) = self.tree.get_mut(current) {
                n.root = root;
                stack.extend(n.children.iter().copied());
            }
        }
    }

    // --- listeners ---

    /// Attach one listener instance
    pub fn add_listener(
        &mut self,
        target: ListenerTarget,
        key: ListenerKey,
        callback: ListenerCallback,
    ) -> ListenerId {
        self.listeners.add(target, key, callback)
    }

    /// Remove one listener instance under the identical key
    pub fn remove_listener(
        &mut self,
        target: ListenerTarget,
        key: ListenerKey,
        id: ListenerId,
    ) -> bool {
        self.listeners.remove(target, key, id)
    }

    /// Listener instances on one target
    pub fn listener_count(&self, target: ListenerTarget) -> usize {
        self.listeners.count_on(target)
    }

    /// Listener instances under one exact key
    pub fn listener_count_for(&self, target: ListenerTarget, key: ListenerKey) -> usize {
        self.listeners.count(target, key)
    }

    /// Total attached listener instances
    pub fn listener_total(&self) -> usize {
        self.listeners.total()
    }

    pub fn listeners_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Targets currently holding at least one listener
    pub fn listener_targets(&self) -> Vec<ListenerTarget> {
        self.listeners.targets()
    }

    // --- observers ---

    /// Start one observer instance on a target
    pub fn observe(
        &mut self,
        target: ListenerTarget,
        config: ObserverConfig,
        callback: ObserverCallback,
    ) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId::new(self.next_observer);
        self.observers.push(ActiveObserver {
            id,
            target,
            config,
            callback,
        });
        id
    }

    /// Disconnect one observer instance. Unknown ids are ignored.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Live observer instances
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Live observer instances on one target
    pub fn observers_on(&self, target: ListenerTarget) -> usize {
        self.observers.iter().filter(|o| o.target == target).count()
    }

    // --- dispatch ---

    /// Dispatch an event at its target node: capturing root listeners,
    /// element listeners, then non-capturing root listeners
    pub fn dispatch(&self, event: &PageEvent) {
        tracing::trace!(kind = ?event.kind, "dispatch");
        let root = self.tree.root_target(event.target);
        let element = ListenerTarget::Element(event.target);
        let phases = [
            (root, ListenerKey::capturing(event.kind)),
            (element, ListenerKey::capturing(event.kind)),
            (element, ListenerKey::bubbling(event.kind)),
            (root, ListenerKey::bubbling(event.kind)),
        ];
        for (target, key) in phases {
            for callback in self.listeners.callbacks(target, key) {
                callback(self, event);
            }
        }
    }

    /// Route one record to the observers watching `scope`
    fn deliver(&self, scope: ListenerTarget, record: MutationRecord) {
        let direct = match scope {
            ListenerTarget::Document => record.target == self.body,
            ListenerTarget::Shadow(id) => {
                self.tree.shadow(id).map(|s| s.host) == Some(record.target)
            }
            ListenerTarget::Element(_) => false,
        };

        let mut matched = Vec::new();
        for observer in &self.observers {
            if observer.target != scope || !observer.config.matches(&record) {
                continue;
            }
            if !observer.config.subtree && !direct {
                continue;
            }
            matched.push((
                observer.callback.clone(),
                observer.config.attribute_old_value,
            ));
        }
        for (callback, keep_old) in matched {
            if keep_old || record.kind != MutationKind::Attributes {
                callback(std::slice::from_ref(&record));
            } else {
                let mut stripped = record.clone();
                stripped.old_value = None;
                callback(std::slice::from_ref(&stripped));
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
