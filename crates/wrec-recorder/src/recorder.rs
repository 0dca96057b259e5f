//! Recorder Lifecycle
//!
//! Binds the process-wide registry to one concrete document: attaches
//! every handler and observer across the document and all shadow roots
//! reachable at traversal time, remembers exactly what was attached for
//! symmetric removal, and owns the per-attach recording state.
//!
//! Attach and detach are both idempotent; duplicate host commands must
//! neither double-register nor trip on double-removal.

use std::cell::Ref;
use std::rc::Rc;

use wrec_dom::{Document, EventKind, ListenerId, ListenerKey, ListenerTarget, NodeId, ObserverId};

use crate::registry::{HandlerSpec, ObserverSpec};
use crate::traverse::{TreeScope, TreeVisitor, traverse};
use crate::{CommandSink, HandlerRegistry, RecordingState, SessionCx};

/// One attached listener, remembered for removal under the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attached {
    target: ListenerTarget,
    key: ListenerKey,
    id: ListenerId,
}

/// Per-document recorder
pub struct Recorder {
    registry: Rc<HandlerRegistry>,
    sink: CommandSink,
    attached: bool,
    listeners: Vec<Attached>,
    observers: Vec<ObserverId>,
    session: Option<SessionCx>,
}

impl Recorder {
    pub fn new(registry: Rc<HandlerRegistry>, sink: CommandSink) -> Self {
        Self {
            registry,
            sink,
            attached: false,
            listeners: Vec::new(),
            observers: Vec::new(),
            session: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Read-only view of the live recording state
    pub fn state(&self) -> Option<Ref<'_, RecordingState>> {
        self.session.as_ref().map(|s| s.state.borrow())
    }

    /// Session context while attached, for externally bound callbacks
    pub fn session(&self) -> Option<&SessionCx> {
        self.session.as_ref()
    }

    /// Attach handlers and observers across the whole document. A
    /// second attach is a no-op.
    pub fn attach(&mut self, doc: &mut Document) {
        if self.attached {
            tracing::debug!("attach ignored, recorder already attached");
            return;
        }

        let session = SessionCx::new(self.sink.clone());
        let registry = self.registry.clone();
        let shadow_targets = collect_shadow_targets(doc);

        // full handler set at the document, shadow-capable subset in
        // every shadow root found at traversal time
        for spec in registry.handlers() {
            self.bind(doc, ListenerTarget::Document, spec, &session);
            if spec.shadow {
                for &target in &shadow_targets {
                    self.bind(doc, target, spec, &session);
                }
            }
        }

        // one observer instance per template per listener target
        for spec in registry.observers() {
            self.observe(doc, ListenerTarget::Document, spec, &session);
            for &target in &shadow_targets {
                self.observe(doc, target, spec, &session);
            }
        }

        for input in doc.tracked_inputs() {
            self.bind_focus_tracking(doc, input, &session);
        }

        self.session = Some(session);
        self.attached = true;
        tracing::debug!(
            listeners = self.listeners.len(),
            observers = self.observers.len(),
            shadow_roots = shadow_targets.len(),
            "recorder attached"
        );
    }

    /// Remove exactly what attach added, under the identical keys. A
    /// second detach is a no-op.
    pub fn detach(&mut self, doc: &mut Document) {
        if !self.attached {
            tracing::debug!("detach ignored, recorder not attached");
            return;
        }

        for attached in self.listeners.drain(..) {
            doc.remove_listener(attached.target, attached.key, attached.id);
        }
        for id in self.observers.drain(..) {
            doc.disconnect(id);
        }
        self.session = None;
        self.attached = false;
        tracing::debug!("recorder detached");
    }

    fn bind(
        &mut self,
        doc: &mut Document,
        target: ListenerTarget,
        spec: &HandlerSpec,
        session: &SessionCx,
    ) {
        let key = ListenerKey::new(spec.event, spec.capture);
        let callback = spec.callback.clone();
        let cx = session.clone();
        let id = doc.add_listener(
            target,
            key,
            Rc::new(move |doc, event| callback(doc, &cx, event)),
        );
        self.listeners.push(Attached { target, key, id });
    }

    fn observe(
        &mut self,
        doc: &mut Document,
        target: ListenerTarget,
        spec: &ObserverSpec,
        session: &SessionCx,
    ) {
        let callback = spec.callback.clone();
        let cx = session.clone();
        let id = doc.observe(
            target,
            spec.config.clone(),
            Rc::new(move |records| callback(&cx, records)),
        );
        self.observers.push(id);
    }

    fn bind_focus_tracking(&mut self, doc: &mut Document, input: NodeId, session: &SessionCx) {
        let target = ListenerTarget::Element(input);

        let focus_key = ListenerKey::bubbling(EventKind::Focus);
        let cx = session.clone();
        let id = doc.add_listener(
            target,
            focus_key,
            Rc::new(move |doc, event| {
                let value = doc.value(event.target).map(str::to_owned);
                cx.state.borrow_mut().on_focus(event.target, value.as_deref());
            }),
        );
        self.listeners.push(Attached {
            target,
            key: focus_key,
            id,
        });

        let blur_key = ListenerKey::bubbling(EventKind::Blur);
        let cx = session.clone();
        let id = doc.add_listener(
            target,
            blur_key,
            Rc::new(move |_, _| cx.state.borrow_mut().on_blur()),
        );
        self.listeners.push(Attached {
            target,
            key: blur_key,
            id,
        });
    }
}

/// Shadow roots reachable from the body, as listener targets
fn collect_shadow_targets(doc: &Document) -> Vec<ListenerTarget> {
    struct ShadowCollector {
        found: Vec<ListenerTarget>,
    }

    impl TreeVisitor<Document> for ShadowCollector {
        fn visit(&mut self, _: &Document, _: <Document as TreeScope>::Node) {}

        fn enter_shadow(&mut self, scope: &Document, host: <Document as TreeScope>::Node) {
            if let Some(shadow) = scope.shadow_id(host) {
                self.found.push(ListenerTarget::Shadow(shadow));
            }
        }
    }

    let mut collector = ShadowCollector { found: Vec::new() };
    traverse(doc, doc.body(), &mut collector);
    collector.found
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wrec_dom::{ObserverConfig, PageEvent};
    use wrec_ipc::{ContextId, HostLink};

    use super::*;
    use crate::HandlerRegistry;

    fn test_sink() -> CommandSink {
        let (link, rx) = HostLink::channel(ContextId(1), Duration::from_millis(5));
        std::mem::forget(rx); // keep the channel open for the test
        CommandSink::new(link)
    }

    fn registry() -> Rc<HandlerRegistry> {
        HandlerRegistry::builder()
            .register("click", EventKind::Click, true, true, Rc::new(|_, _, _| {}))
            .register("change", EventKind::Change, false, true, Rc::new(|_, _, _| {}))
            .register("keyDown", EventKind::KeyDown, true, false, Rc::new(|_, _, _| {}))
            .register_observer(
                "watch",
                ObserverConfig {
                    attributes: true,
                    subtree: true,
                    ..Default::default()
                },
                Rc::new(|_, _| {}),
            )
            .build()
    }

    /// body > section > widget(#shadow: button), plus a tracked input
    fn shadow_doc() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let section = doc.create_element("section");
        doc.append_child(body, section).unwrap();
        let host = doc.create_element("widget");
        doc.append_child(section, host).unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        let button = doc.create_element("button");
        doc.append_shadow_child(shadow, button).unwrap();
        let input = doc.create_input("text", "abc");
        doc.append_child(body, input).unwrap();
        (doc, input)
    }

    #[test]
    fn test_attach_fans_out_across_targets() {
        let (mut doc, input) = shadow_doc();
        let shadow = doc.shadow_id(doc.children(doc.children(doc.body())[0])[0]).unwrap();
        let mut recorder = Recorder::new(registry(), test_sink());

        recorder.attach(&mut doc);

        let document = ListenerTarget::Document;
        let shadow_target = ListenerTarget::Shadow(shadow);
        // full set at the document: click, change, keyDown
        assert_eq!(doc.listener_count(document), 3);
        // shadow-capable subset in the shadow root: click, change
        assert_eq!(doc.listener_count(shadow_target), 2);
        // focus + blur tracking on the input element
        assert_eq!(doc.listener_count(ListenerTarget::Element(input)), 2);
        // one observer instance per target
        assert_eq!(doc.observers_on(document), 1);
        assert_eq!(doc.observers_on(shadow_target), 1);
    }

    #[test]
    fn test_attach_twice_is_a_noop() {
        let (mut doc, _) = shadow_doc();
        let mut recorder = Recorder::new(registry(), test_sink());

        recorder.attach(&mut doc);
        let listeners = doc.listener_total();
        let observers = doc.observer_count();

        recorder.attach(&mut doc);
        assert_eq!(doc.listener_total(), listeners);
        assert_eq!(doc.observer_count(), observers);
    }

    #[test]
    fn test_detach_restores_the_empty_state() {
        let (mut doc, _) = shadow_doc();
        let mut recorder = Recorder::new(registry(), test_sink());

        recorder.attach(&mut doc);
        assert!(doc.listener_total() > 0);

        recorder.detach(&mut doc);
        assert!(doc.listeners_empty());
        assert_eq!(doc.observer_count(), 0);
        assert!(recorder.state().is_none());

        // double detach stays harmless
        recorder.detach(&mut doc);
        assert!(doc.listeners_empty());
    }

    #[test]
    fn test_focus_tracking_updates_state() {
        let (mut doc, input) = shadow_doc();
        let mut recorder = Recorder::new(registry(), test_sink());
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Focus, input));
        {
            let state = recorder.state().unwrap();
            assert_eq!(state.focus_target, Some(input));
            assert_eq!(state.focus_value.as_deref(), Some("abc"));
            assert_eq!(state.temp_value.as_deref(), Some("abc"));
        }

        doc.dispatch(&PageEvent::new(EventKind::Blur, input));
        {
            let state = recorder.state().unwrap();
            assert_eq!(state.focus_target, None);
            assert_eq!(state.focus_value, None);
            assert_eq!(state.temp_value, None);
        }
    }

    #[test]
    fn test_fresh_state_every_attach() {
        let (mut doc, input) = shadow_doc();
        let mut recorder = Recorder::new(registry(), test_sink());

        recorder.attach(&mut doc);
        doc.dispatch(&PageEvent::new(EventKind::Focus, input));
        recorder.detach(&mut doc);

        recorder.attach(&mut doc);
        let state = recorder.state().unwrap();
        assert_eq!(state.focus_target, None);
    }
}
