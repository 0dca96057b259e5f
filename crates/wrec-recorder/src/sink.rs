//! Command Sink
//!
//! Emits captured commands to the host, tagged with the context's
//! resolved frame path. Loss on a closed channel is tolerated;
//! recording races page unload.

use std::cell::RefCell;
use std::rc::Rc;

use wrec_ipc::{ContextNotice, HostLink, RecordedCommand};

/// Clonable command emitter shared by every bound handler
#[derive(Debug, Clone)]
pub struct CommandSink {
    link: HostLink,
    frame_location: Rc<RefCell<String>>,
}

impl CommandSink {
    pub fn new(link: HostLink) -> Self {
        Self {
            link,
            frame_location: Rc::new(RefCell::new("root".to_string())),
        }
    }

    /// Update the path commands are tagged with, after (re)resolution
    pub fn set_frame_location(&self, path: impl Into<String>) {
        *self.frame_location.borrow_mut() = path.into();
    }

    pub fn frame_location(&self) -> String {
        self.frame_location.borrow().clone()
    }

    /// Send one captured command upward
    pub fn record(&self, command: &str, target: &str, value: &str) {
        self.send(RecordedCommand::new(
            command,
            target,
            value,
            &self.frame_location(),
        ));
    }

    /// Send a command slotted in before the last one, for interactions
    /// whose parts are captured out of order
    pub fn record_before_last(&self, command: &str, target: &str, value: &str) {
        let mut cmd = RecordedCommand::new(command, target, value, &self.frame_location());
        cmd.insert_before_last = true;
        self.send(cmd);
    }

    fn send(&self, command: RecordedCommand) {
        tracing::debug!(
            command = %command.command,
            target = %command.target,
            "command captured"
        );
        self.link.notify(ContextNotice::Command(command));
    }
}
