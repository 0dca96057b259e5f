//! Target Locators
//!
//! Builds the target string a captured command refers to its element
//! by: `id=` when the element carries one, a positional `css=` chain
//! otherwise.

use wrec_dom::{Document, NodeId};

/// Locator for a node
pub fn locator_for(doc: &Document, node: NodeId) -> String {
    if let Some(element) = doc.element(node) {
        if let Some(id) = &element.id {
            return format!("id={id}");
        }
    }
    format!("css={}", css_path(doc, node))
}

fn css_path(doc: &Document, node: NodeId) -> String {
    let mut parts = Vec::new();
    let mut current = node;

    while let Some(element) = doc.element(current) {
        if current == doc.body() {
            parts.push("body".to_string());
            break;
        }
        let position = doc
            .parent(current)
            .map(|parent| element_position(doc, parent, current))
            .unwrap_or(1);
        parts.push(format!("{}:nth-child({position})", element.tag));
        match doc.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    parts.reverse();
    parts.join(" > ")
}

/// 1-based position among the parent's element children; shadow
/// children count within their shadow root
fn element_position(doc: &Document, parent: NodeId, node: NodeId) -> usize {
    let light = doc.children(parent);
    let siblings: Vec<NodeId> = if light.contains(&node) {
        light.to_vec()
    } else {
        doc.shadow_id(parent)
            .map(|shadow| doc.shadow_children(shadow).to_vec())
            .unwrap_or_default()
    };
    siblings
        .iter()
        .filter(|&&c| doc.element(c).is_some())
        .position(|&c| c == node)
        .map(|p| p + 1)
        .unwrap_or(1)
}
