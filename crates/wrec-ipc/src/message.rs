//! Protocol Messages
//!
//! Message types exchanged between a rendering context and the host
//! panel process.

use serde::{Deserialize, Serialize};

/// Identity of a rendering context, assigned by the embedder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(pub u32);

/// A captured command, tagged with the frame path it was recorded in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedCommand {
    pub command: String,
    pub target: String,
    pub value: String,
    /// Path of the context the command was captured in
    pub frame_location: String,
    /// Insert before the last command instead of appending
    pub insert_before_last: bool,
}

impl RecordedCommand {
    pub fn new(command: &str, target: &str, value: &str, frame_location: &str) -> Self {
        Self {
            command: command.to_string(),
            target: target.to_string(),
            value: value.to_string(),
            frame_location: frame_location.to_string(),
            insert_before_last: false,
        }
    }
}

/// Fire-and-forget notices, context to host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextNotice {
    /// Report the resolved frame path
    FrameLocation { path: String },
    /// The recording indicator was injected and consumes this child slot
    IndicatorShown { index: u32 },
    /// The recording indicator was removed again
    IndicatorHidden,
    /// A captured command for the panel
    Command(RecordedCommand),
}

/// Request/response messages, context to host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextRequest {
    /// Current indicator slot correction
    IndicatorIndex,
    /// Frame-count query issued during ascent through the top level
    FrameCount,
    /// Drive the visual recording indicator
    RecordNotification {
        command: String,
        target: String,
        value: String,
    },
}

/// Host replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostReply {
    /// Indicator correction; `None` when no indicator is injected
    IndicatorIndex { indicator_index: Option<u32> },
    /// Boolean acknowledgment
    Ack(bool),
}

/// Commands from the host, each acknowledged with a bool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostCommand {
    AttachRecorder,
    DetachRecorder,
    RecalculateFrameLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_command() {
        let cmd = RecordedCommand::new("click", "id=submit", "", "root:1");

        assert_eq!(cmd.command, "click");
        assert_eq!(cmd.frame_location, "root:1");
        assert!(!cmd.insert_before_last);
    }

    #[test]
    fn test_reply_carries_missing_indicator() {
        let reply = HostReply::IndicatorIndex {
            indicator_index: None,
        };

        assert_eq!(
            reply,
            HostReply::IndicatorIndex {
                indicator_index: None
            }
        );
    }
}
