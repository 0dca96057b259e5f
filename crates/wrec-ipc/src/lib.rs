//! wrec IPC
//!
//! Message shapes and the host link every rendering context talks
//! through, plus the bounded-retry wait primitive.
//!
//! The wire format is the embedder's concern; every message type here
//! is serde-ready but otherwise transport-agnostic.

mod link;
mod message;
mod retry;

pub use link::{Envelope, HostLink};
pub use message::{
    ContextId, ContextNotice, ContextRequest, HostCommand, HostReply, RecordedCommand,
};
pub use retry::{RetryPolicy, WaitTimeout, wait_until};
