//! Default Capture Handlers
//!
//! The stock handler set a recording session binds. Emission decisions
//! consult the recording state; the state machine itself lives in
//! [`crate::RecordingState`].

use std::rc::Rc;

use wrec_dom::{Document, EventKind, MutationKind, MutationRecord, ObserverConfig, PageEvent};

use crate::registry::HandlerRegistry;
use crate::{SessionCx, locator_for};

/// Build the stock registry: pointer handlers attach into shadow roots
/// too, keyboard capture stays at the document.
pub fn default_registry() -> Rc<HandlerRegistry> {
    HandlerRegistry::builder()
        .register("click", EventKind::Click, true, true, Rc::new(on_click))
        .register(
            "doubleClick",
            EventKind::DblClick,
            true,
            true,
            Rc::new(on_double_click),
        )
        .register(
            "contextMenu",
            EventKind::ContextMenu,
            true,
            true,
            Rc::new(on_context_menu),
        )
        .register("change", EventKind::Change, false, true, Rc::new(on_change))
        .register("input", EventKind::Input, false, true, Rc::new(on_input))
        .register(
            "pressEnter",
            EventKind::KeyDown,
            true,
            false,
            Rc::new(on_key_down),
        )
        .register_observer(
            "valueTracker",
            value_tracker_config(),
            Rc::new(on_value_mutation),
        )
        .build()
}

fn on_click(doc: &Document, cx: &SessionCx, event: &PageEvent) {
    {
        let mut state = cx.state.borrow_mut();
        if state.prevent_click {
            state.prevent_click = false;
            return;
        }
        if state.prevent_click_twice {
            state.prevent_click_twice = false;
            return;
        }
    }
    cx.sink.record("click", &locator_for(doc, event.target), "");
}

fn on_double_click(doc: &Document, cx: &SessionCx, event: &PageEvent) {
    // the two single clicks were already captured
    cx.state.borrow_mut().prevent_click_twice = false;
    cx.sink
        .record("doubleClick", &locator_for(doc, event.target), "");
}

fn on_context_menu(doc: &Document, cx: &SessionCx, event: &PageEvent) {
    cx.sink
        .record("contextMenu", &locator_for(doc, event.target), "");
}

fn on_change(doc: &Document, cx: &SessionCx, event: &PageEvent) {
    let value = event
        .value
        .clone()
        .or_else(|| doc.value(event.target).map(str::to_owned))
        .unwrap_or_default();

    let is_select = doc
        .element(event.target)
        .map(|e| e.tag == "select")
        .unwrap_or(false);

    {
        let mut state = cx.state.borrow_mut();
        if state.prevent_type {
            state.prevent_type = false;
            return;
        }
        if state.is_focused(event.target) {
            state.temp_value = Some(value.clone());
        }
        if is_select {
            // the click that opened the select is part of this change
            state.prevent_click = true;
        }
    }

    let command = if is_select { "select" } else { "type" };
    cx.sink
        .record(command, &locator_for(doc, event.target), &value);
}

fn on_input(_doc: &Document, cx: &SessionCx, event: &PageEvent) {
    // keep the working value current while the user edits
    let mut state = cx.state.borrow_mut();
    if state.is_focused(event.target) {
        state.temp_value = event.value.clone();
    }
}

fn on_key_down(doc: &Document, cx: &SessionCx, event: &PageEvent) {
    if event.key.as_deref() != Some("Enter") {
        return;
    }
    {
        let mut state = cx.state.borrow_mut();
        if !state.is_focused(event.target) {
            return;
        }
        state.enter_target = Some(event.target);
        state.enter_value = state.temp_value.clone();
    }
    cx.sink
        .record("sendKeys", &locator_for(doc, event.target), "${KEY_ENTER}");
}

fn value_tracker_config() -> ObserverConfig {
    ObserverConfig {
        attributes: true,
        subtree: true,
        attribute_old_value: true,
        attribute_filter: Some(vec!["value".to_string()]),
        ..Default::default()
    }
}

/// Programmatic value changes on the focused element invalidate the
/// pending type summary
fn on_value_mutation(cx: &SessionCx, records: &[MutationRecord]) {
    let mut state = cx.state.borrow_mut();
    for record in records {
        if record.kind != MutationKind::Attributes {
            continue;
        }
        if state.focus_target != Some(record.target) {
            continue;
        }
        if record.new_value != state.temp_value {
            state.temp_value = record.new_value.clone();
            state.prevent_type = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wrec_dom::NodeId;
    use wrec_ipc::{ContextId, ContextNotice, Envelope, HostLink, RecordedCommand};
    use smol::channel::Receiver;

    use super::*;
    use crate::{CommandSink, Recorder};

    fn wired() -> (Document, Recorder, Receiver<Envelope>) {
        let (link, rx) = HostLink::channel(ContextId(1), Duration::from_millis(5));
        let recorder = Recorder::new(default_registry(), CommandSink::new(link));
        (Document::new(), recorder, rx)
    }

    fn commands(rx: &Receiver<Envelope>) -> Vec<RecordedCommand> {
        let mut commands = Vec::new();
        while let Ok(envelope) = rx.try_recv() {
            if let Envelope::Notice {
                notice: ContextNotice::Command(cmd),
                ..
            } = envelope
            {
                commands.push(cmd);
            }
        }
        commands
    }

    fn add_button(doc: &mut Document, id: &str) -> NodeId {
        let body = doc.body();
        let button = doc.create_element("button");
        doc.set_id(button, id);
        doc.append_child(body, button).unwrap();
        button
    }

    #[test]
    fn test_click_is_recorded_with_locator() {
        let (mut doc, mut recorder, rx) = wired();
        let button = add_button(&mut doc, "go");
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Click, button));

        let captured = commands(&rx);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].command, "click");
        assert_eq!(captured[0].target, "id=go");
    }

    #[test]
    fn test_click_inside_shadow_is_recorded() {
        let (mut doc, mut recorder, rx) = wired();
        let body = doc.body();
        let host = doc.create_element("widget");
        doc.append_child(body, host).unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        let button = doc.create_element("button");
        doc.set_id(button, "inner");
        doc.append_shadow_child(shadow, button).unwrap();
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Click, button));

        let captured = commands(&rx);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].target, "id=inner");
    }

    #[test]
    fn test_change_on_focused_input_becomes_type() {
        let (mut doc, mut recorder, rx) = wired();
        let body = doc.body();
        let input = doc.create_input("text", "old");
        doc.set_id(input, "name");
        doc.append_child(body, input).unwrap();
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Focus, input));
        doc.dispatch(&PageEvent::with_value(EventKind::Input, input, "ne"));
        doc.dispatch(&PageEvent::with_value(EventKind::Change, input, "new"));

        let captured = commands(&rx);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].command, "type");
        assert_eq!(captured[0].value, "new");
        assert_eq!(
            recorder.state().unwrap().temp_value.as_deref(),
            Some("new")
        );
    }

    #[test]
    fn test_select_change_swallows_the_paired_click() {
        let (mut doc, mut recorder, rx) = wired();
        let body = doc.body();
        let select = doc.create_element("select");
        doc.set_id(select, "color");
        doc.append_child(body, select).unwrap();
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::with_value(EventKind::Change, select, "red"));
        doc.dispatch(&PageEvent::new(EventKind::Click, select));

        let captured = commands(&rx);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].command, "select");
        assert_eq!(captured[0].value, "red");
    }

    #[test]
    fn test_programmatic_value_change_suppresses_type() {
        let (mut doc, mut recorder, rx) = wired();
        let body = doc.body();
        let input = doc.create_input("text", "typed");
        doc.append_child(body, input).unwrap();
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Focus, input));
        doc.set_value(input, "scripted").unwrap();
        doc.dispatch(&PageEvent::with_value(EventKind::Change, input, "scripted"));

        // the observer marked the edit programmatic; no type command
        assert!(commands(&rx).is_empty());
        assert_eq!(
            recorder.state().unwrap().temp_value.as_deref(),
            Some("scripted")
        );
    }

    #[test]
    fn test_enter_key_records_send_keys() {
        let (mut doc, mut recorder, rx) = wired();
        let body = doc.body();
        let input = doc.create_input("text", "q");
        doc.set_id(input, "search");
        doc.append_child(body, input).unwrap();
        recorder.attach(&mut doc);

        doc.dispatch(&PageEvent::new(EventKind::Focus, input));
        doc.dispatch(&PageEvent::key_down(input, "Enter"));
        doc.dispatch(&PageEvent::key_down(input, "a"));

        let captured = commands(&rx);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].command, "sendKeys");
        assert_eq!(captured[0].value, "${KEY_ENTER}");
    }

    #[test]
    fn test_shadow_subset_excludes_keyboard_handler() {
        let registry = default_registry();
        let shadow_capable: Vec<_> = registry
            .handlers()
            .iter()
            .filter(|h| h.shadow)
            .map(|h| h.name)
            .collect();

        assert!(shadow_capable.contains(&"click"));
        assert!(!shadow_capable.contains(&"pressEnter"));
    }
}
