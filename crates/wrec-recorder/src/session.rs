//! Recording State
//!
//! Focus/blur tracking consulted by command emission to tell a typed
//! edit from a programmatic change. Created fresh on every attach,
//! dropped on detach; never persisted.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wrec_dom::NodeId;

use crate::CommandSink;

/// Per-attach mutable recording state
#[derive(Debug, Default)]
pub struct RecordingState {
    /// Currently focused tracked input; cleared on blur so the
    /// reference never outlives the element
    pub focus_target: Option<NodeId>,
    /// Value the input held when focus arrived
    pub focus_value: Option<String>,
    /// Working value, updated while the user edits
    pub temp_value: Option<String>,
    pub prevent_type: bool,
    pub prevent_click: bool,
    pub prevent_click_twice: bool,
    pub enter_target: Option<NodeId>,
    pub enter_value: Option<String>,
}

impl RecordingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus gained on a tracked input
    pub fn on_focus(&mut self, target: NodeId, value: Option<&str>) {
        self.focus_target = Some(target);
        self.focus_value = value.map(str::to_owned);
        self.temp_value = self.focus_value.clone();
        self.prevent_type = false;
    }

    /// Focus left the tracked input
    pub fn on_blur(&mut self) {
        self.focus_target = None;
        self.focus_value = None;
        self.temp_value = None;
    }

    pub fn is_focused(&self, node: NodeId) -> bool {
        self.focus_target == Some(node)
    }
}

/// Shared context handed to every bound handler
#[derive(Debug, Clone)]
pub struct SessionCx {
    pub state: Rc<RefCell<RecordingState>>,
    pub sink: CommandSink,
}

impl SessionCx {
    pub fn new(sink: CommandSink) -> Self {
        Self {
            state: Rc::new(RefCell::new(RecordingState::new())),
            sink,
        }
    }

    /// Read-only view of the state
    pub fn state(&self) -> Ref<'_, RecordingState> {
        self.state.borrow()
    }
}
