//! Recording Indicator
//!
//! Top-level-only visual overlay. Its injected frame consumes a child
//! slot in the top-level context, which is exactly the correction the
//! resolver asks the host about. Only the top level ever hosts one;
//! nested contexts never inject it.

use wrec_dom::{Document, NodeId};
use wrec_ipc::{ContextNotice, HostLink};

use crate::{FrameId, FrameTree};

/// Element id of the injected overlay
pub const INDICATOR_ELEMENT_ID: &str = "wrec-recording-indicator";

/// Overlay lifecycle for the top-level context
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    frame: Option<FrameId>,
    element: Option<NodeId>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.frame.is_some()
    }

    /// The injected frame, while shown
    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Inject the overlay and report the consumed slot index to the
    /// host. Showing twice is a no-op.
    pub fn show(&mut self, tree: &mut FrameTree, doc: &mut Document, link: &HostLink) {
        if self.frame.is_some() {
            return;
        }
        let top = tree.top();
        let (frame, index) = tree.push_indicator(top);
        self.frame = Some(frame);

        let element = doc.create_element("iframe");
        doc.set_id(element, INDICATOR_ELEMENT_ID);
        let body = doc.body();
        if doc.append_child(body, element).is_ok() {
            self.element = Some(element);
        }

        link.notify(ContextNotice::IndicatorShown { index });
        tracing::debug!(index, "recording indicator shown");
    }

    /// Remove the overlay and release its slot. Hiding twice is a
    /// no-op.
    pub fn hide(&mut self, tree: &mut FrameTree, doc: &mut Document, link: &HostLink) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        let top = tree.top();
        tree.remove_child(top, frame);
        if let Some(element) = self.element.take() {
            let body = doc.body();
            let _ = doc.remove_child(body, element);
        }
        link.notify(ContextNotice::IndicatorHidden);
        tracing::debug!("recording indicator hidden");
    }
}
