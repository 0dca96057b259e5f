//! wrec Frames
//!
//! Frame identity: the live containment tree of rendering contexts,
//! the indicator-aware index calculator, the colon-delimited path
//! scheme and the asynchronous location resolver.

mod index;
mod indicator;
mod path;
mod resolver;
mod tree;

pub use index::calculate_frame_index;
pub use indicator::{INDICATOR_ELEMENT_ID, RecordingIndicator};
pub use path::FramePath;
pub use resolver::{resolve_and_report, resolve_frame_location};
pub use tree::{FrameId, FrameKind, FrameTree};
