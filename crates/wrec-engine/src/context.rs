//! Context Runtime
//!
//! One rendering context end to end: its document, its recorder and
//! its frame identity, driven by host commands. Every context runs
//! this independently; contexts only ever talk through the host
//! channel.

use std::cell::RefCell;
use std::rc::Rc;

use wrec_dom::{Document, PageEvent};
use wrec_frames::{FrameId, FramePath, FrameTree, RecordingIndicator, resolve_and_report};
use wrec_ipc::{ContextId, ContextRequest, HostCommand, HostLink, HostReply};
use wrec_recorder::{CommandSink, HandlerRegistry, Recorder};

use crate::RecorderConfig;

/// Context identity a frame's link speaks under
pub fn context_id(frame: FrameId) -> ContextId {
    ContextId(frame.raw())
}

/// Per-context runtime
pub struct ContextRuntime {
    frame: FrameId,
    tree: Rc<RefCell<FrameTree>>,
    doc: Document,
    recorder: Recorder,
    sink: CommandSink,
    link: HostLink,
    indicator: RecordingIndicator,
    config: RecorderConfig,
    path: Option<FramePath>,
}

impl ContextRuntime {
    pub fn new(
        frame: FrameId,
        tree: Rc<RefCell<FrameTree>>,
        registry: Rc<HandlerRegistry>,
        link: HostLink,
        config: RecorderConfig,
    ) -> Self {
        let sink = CommandSink::new(link.clone());
        let recorder = Recorder::new(registry, sink.clone());
        Self {
            frame,
            tree,
            doc: Document::new(),
            recorder,
            sink,
            link,
            indicator: RecordingIndicator::new(),
            config,
            path: None,
        }
    }

    pub fn frame(&self) -> FrameId {
        self.frame
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable document access, for building and mutating page content
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Path from the most recent resolution
    pub fn path(&self) -> Option<&FramePath> {
        self.path.as_ref()
    }

    fn is_top(&self) -> bool {
        self.tree.borrow().is_top(self.frame)
    }

    /// Resolve and report this context's location, as done once at load
    pub async fn boot(&mut self) {
        let path = resolve_and_report(&self.tree, self.frame, &self.link).await;
        self.sink.set_frame_location(path.to_string());
        self.path = Some(path);
    }

    /// Handle one host command, returning the acknowledgment
    pub async fn handle(&mut self, command: HostCommand) -> bool {
        match command {
            HostCommand::AttachRecorder => {
                self.attach();
                true
            }
            HostCommand::DetachRecorder => {
                self.detach();
                true
            }
            HostCommand::RecalculateFrameLocation => {
                self.recalculate().await;
                true
            }
        }
    }

    /// Attach the recorder across this context's document; the
    /// top-level context also shows the indicator. Safe to call twice.
    pub fn attach(&mut self) {
        self.recorder.attach(&mut self.doc);
        if self.is_top() {
            let mut tree = self.tree.borrow_mut();
            self.indicator.show(&mut tree, &mut self.doc, &self.link);
        }
    }

    /// Symmetric teardown. Safe to call twice.
    pub fn detach(&mut self) {
        self.recorder.detach(&mut self.doc);
        if self.is_top() {
            let mut tree = self.tree.borrow_mut();
            self.indicator.hide(&mut tree, &mut self.doc, &self.link);
        }
    }

    /// Drop the current path, cycle the indicator around a settle
    /// delay, then re-resolve and report
    pub async fn recalculate(&mut self) {
        self.path = None;
        let was_shown = self.indicator.is_shown();
        if was_shown {
            let mut tree = self.tree.borrow_mut();
            self.indicator.hide(&mut tree, &mut self.doc, &self.link);
        }
        smol::Timer::after(self.config.indicator_settle).await;
        if was_shown {
            let mut tree = self.tree.borrow_mut();
            self.indicator.show(&mut tree, &mut self.doc, &self.link);
        }
        self.boot().await;
    }

    /// Dispatch a page event into this context's document
    pub fn dispatch(&self, event: &PageEvent) {
        self.doc.dispatch(event);
    }

    /// Drive the visual indicator for one captured command
    pub async fn notify_indicator(&self, command: &str, target: &str, value: &str) -> bool {
        let request = ContextRequest::RecordNotification {
            command: command.to_string(),
            target: target.to_string(),
            value: value.to_string(),
        };
        matches!(self.link.request(request).await, Some(HostReply::Ack(true)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wrec_recorder::default_registry;

    use super::*;

    #[test]
    fn test_attach_detach_acks_without_a_host() {
        let tree = Rc::new(RefCell::new(FrameTree::new()));
        let frame = tree.borrow().top();
        let (link, rx) = HostLink::channel(context_id(frame), Duration::from_millis(5));
        drop(rx); // host gone; lifecycle still works locally

        let mut runtime = ContextRuntime::new(
            frame,
            tree,
            default_registry(),
            link,
            RecorderConfig::default(),
        );

        let attach = smol::block_on(runtime.handle(HostCommand::AttachRecorder));
        assert!(attach);
        assert!(runtime.recorder().is_attached());

        let detach = smol::block_on(runtime.handle(HostCommand::DetachRecorder));
        assert!(detach);
        assert!(!runtime.recorder().is_attached());
        assert!(runtime.document().listeners_empty());
    }
}
