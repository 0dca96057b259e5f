//! wrec Recorder
//!
//! Event fan-out across a live document: a process-wide handler
//! registry, a shadow-aware tree traverser, and the per-document
//! attach/detach lifecycle with its focus-tracking state.

mod handlers;
mod locator;
mod recorder;
mod registry;
mod session;
mod sink;
mod traverse;

pub use handlers::default_registry;
pub use locator::locator_for;
pub use recorder::Recorder;
pub use registry::{
    HandlerFn, HandlerRegistry, HandlerSpec, ObserverFn, ObserverSpec, RegistryBuilder,
};
pub use session::{RecordingState, SessionCx};
pub use sink::CommandSink;
pub use traverse::{TreeScope, TreeVisitor, traverse};
