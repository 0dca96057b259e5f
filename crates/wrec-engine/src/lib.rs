//! wrec Engine
//!
//! Per-context runtime for the wrec recorder: wires a document, the
//! recorder lifecycle and frame identity together and speaks the host
//! protocol. The in-process [`HostHub`] stands in for the panel
//! process on the other end of the channel.
//!
//! # Example
//! ```rust,ignore
//! use wrec_engine::{ContextRuntime, HostHub, RecorderConfig};
//!
//! let mut runtime = ContextRuntime::new(frame, tree, registry, link, config);
//! smol::block_on(runtime.boot());
//! runtime.attach();
//! ```

mod config;
mod context;
mod hub;
mod panel;

pub use config::RecorderConfig;
pub use context::{ContextRuntime, context_id};
pub use hub::HostHub;
pub use panel::{PanelHandle, PanelPhase, wait_for_panel};
