//! Example: record a short interaction against a two-frame page

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wrec_dom::{EventKind, PageEvent};
use wrec_engine::{ContextRuntime, HostHub, RecorderConfig, context_id};
use wrec_frames::FrameTree;
use wrec_ipc::{HostCommand, HostLink};
use wrec_recorder::default_registry;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let tree = Rc::new(RefCell::new(FrameTree::new()));
    let top = tree.borrow().top();
    let child_frame = tree.borrow_mut().create_child(top);

    let (top_link, rx) = HostLink::channel(context_id(top), Duration::from_millis(100));
    let child_link = HostLink::attach(
        context_id(child_frame),
        top_link.sender(),
        Duration::from_millis(100),
    );
    let hub = Rc::new(RefCell::new(HostHub::new()));

    let registry = default_registry();
    let mut top_ctx = ContextRuntime::new(
        top,
        tree.clone(),
        registry.clone(),
        top_link,
        RecorderConfig::default(),
    );
    let mut child_ctx = ContextRuntime::new(
        child_frame,
        tree.clone(),
        registry,
        child_link,
        RecorderConfig::default(),
    );

    // page content: a button in the child frame, behind a shadow root
    let button = {
        let doc = child_ctx.document_mut();
        let body = doc.body();
        let host = doc.create_element("widget");
        doc.append_child(body, host).unwrap();
        let shadow = doc.attach_shadow(host).unwrap();
        let button = doc.create_element("button");
        doc.set_id(button, "save");
        doc.append_shadow_child(shadow, button).unwrap();
        button
    };

    let hub_for_serve = hub.clone();
    let pending = rx.clone();
    let _ = smol::block_on(smol::future::or(
        async move {
            top_ctx.boot().await;
            child_ctx.boot().await;

            top_ctx.handle(HostCommand::AttachRecorder).await;
            child_ctx.handle(HostCommand::AttachRecorder).await;

            child_ctx.dispatch(&PageEvent::new(EventKind::Click, button));

            top_ctx.handle(HostCommand::DetachRecorder).await;
            child_ctx.handle(HostCommand::DetachRecorder).await;
            Some(())
        },
        async move {
            HostHub::run(hub_for_serve, rx).await;
            None
        },
    ));

    hub.borrow_mut().drain(&pending);

    let hub = hub.borrow();
    println!("frame locations:");
    println!("  top:   {:?}", hub.frame_location(context_id(top)));
    println!("  child: {:?}", hub.frame_location(context_id(child_frame)));
    println!("captured commands:");
    for command in hub.commands() {
        println!(
            "  [{}] {} {} {:?}",
            command.frame_location, command.command, command.target, command.value
        );
    }
}
