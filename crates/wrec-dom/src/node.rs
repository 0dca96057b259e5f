//! DOM Node
//!
//! Element and text nodes stored in the tree arena.

use crate::{ListenerTarget, NodeId, ShadowId};

/// Input types the recorder tracks focus on
pub const TRACKED_INPUT_TYPES: &[&str] = &[
    "text",
    "password",
    "email",
    "search",
    "tel",
    "url",
    "number",
    "date",
    "month",
    "week",
    "time",
    "datetime-local",
    "color",
    "range",
];

/// A node in the document tree
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Ordered children; always re-read, never cached by callers
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
    /// Root listener target this node currently lives under
    pub(crate) root: ListenerTarget,
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    pub tag: String,
    /// Cached id attribute
    pub id: Option<String>,
    /// Remaining attributes
    pub attrs: Vec<(String, String)>,
    /// Current value, for input-like elements
    pub value: Option<String>,
    /// Input type attribute, for `<input>`
    pub input_type: Option<String>,
    /// Attached shadow subtree, if any
    pub shadow: Option<ShadowId>,
}

impl Node {
    pub(crate) fn element(data: ElementData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Element(data),
            root: ListenerTarget::Document,
        }
    }

    pub(crate) fn text(content: String) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Text(content),
            root: ListenerTarget::Document,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attrs: Vec::new(),
            value: None,
            input_type: None,
            shadow: None,
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, returning the previous value
    pub fn set_attr(&mut self, name: &str, value: &str) -> Option<String> {
        for (n, v) in self.attrs.iter_mut() {
            if n == name {
                return Some(std::mem::replace(v, value.to_string()));
            }
        }
        self.attrs.push((name.to_string(), value.to_string()));
        None
    }

    /// Input the focus tracker cares about
    pub fn is_tracked_input(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => {
                let ty = self.input_type.as_deref().unwrap_or("text");
                TRACKED_INPUT_TYPES.contains(&ty)
            }
            _ => false,
        }
    }
}
