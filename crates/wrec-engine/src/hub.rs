//! Host Hub
//!
//! In-process stand-in for the panel/background process on the other
//! end of the context channel: answers indicator-index requests from
//! its stored correction, acks record notifications, and accumulates
//! frame locations and captured commands for inspection.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smol::channel::Receiver;
use wrec_ipc::{ContextId, ContextNotice, ContextRequest, Envelope, HostReply, RecordedCommand};

/// Host-side state
#[derive(Debug, Default)]
pub struct HostHub {
    indicator_index: Option<u32>,
    frame_locations: HashMap<ContextId, String>,
    commands: Vec<RecordedCommand>,
    notifications: Vec<(String, String, String)>,
}

impl HostHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indicator correction as last reported by the top-level context
    pub fn indicator_index(&self) -> Option<u32> {
        self.indicator_index
    }

    /// Path last reported by a context
    pub fn frame_location(&self, context: ContextId) -> Option<&str> {
        self.frame_locations.get(&context).map(String::as_str)
    }

    /// Captured commands, in arrival order
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Record notifications that drove the visual indicator
    pub fn notifications(&self) -> &[(String, String, String)] {
        &self.notifications
    }

    /// Apply one envelope
    pub fn handle(&mut self, envelope: Envelope) {
        match envelope {
            Envelope::Notice { from, notice } => self.on_notice(from, notice),
            Envelope::Request { request, reply, .. } => {
                let response = self.on_request(request);
                // a context that gave up waiting is not an error
                let _ = reply.try_send(response);
            }
        }
    }

    /// Apply everything queued right now, without waiting
    pub fn drain(&mut self, rx: &Receiver<Envelope>) {
        while let Ok(envelope) = rx.try_recv() {
            self.handle(envelope);
        }
    }

    /// Serve the channel until every link is dropped. Shared so tests
    /// and embedders can inspect the hub while it serves; everything
    /// runs on one thread.
    pub async fn run(hub: Rc<RefCell<HostHub>>, rx: Receiver<Envelope>) {
        while let Ok(envelope) = rx.recv().await {
            hub.borrow_mut().handle(envelope);
        }
    }

    fn on_notice(&mut self, from: ContextId, notice: ContextNotice) {
        match notice {
            ContextNotice::FrameLocation { path } => {
                tracing::debug!(context = from.0, path = %path, "frame location reported");
                self.frame_locations.insert(from, path);
            }
            ContextNotice::IndicatorShown { index } => {
                self.indicator_index = Some(index);
            }
            ContextNotice::IndicatorHidden => {
                self.indicator_index = None;
            }
            ContextNotice::Command(command) => {
                self.commands.push(command);
            }
        }
    }

    fn on_request(&mut self, request: ContextRequest) -> HostReply {
        match request {
            ContextRequest::IndicatorIndex | ContextRequest::FrameCount => {
                HostReply::IndicatorIndex {
                    indicator_index: self.indicator_index,
                }
            }
            ContextRequest::RecordNotification {
                command,
                target,
                value,
            } => {
                self.notifications.push((command, target, value));
                HostReply::Ack(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wrec_ipc::HostLink;

    use super::*;

    #[test]
    fn test_notices_update_state() {
        let (link, rx) = HostLink::channel(ContextId(4), Duration::from_millis(5));
        let mut hub = HostHub::new();

        link.notify(ContextNotice::FrameLocation {
            path: "root:1".to_string(),
        });
        link.notify(ContextNotice::IndicatorShown { index: 2 });
        hub.drain(&rx);

        assert_eq!(hub.frame_location(ContextId(4)), Some("root:1"));
        assert_eq!(hub.indicator_index(), Some(2));

        link.notify(ContextNotice::IndicatorHidden);
        hub.drain(&rx);
        assert_eq!(hub.indicator_index(), None);
    }

    #[test]
    fn test_requests_are_answered() {
        let (link, rx) = HostLink::channel(ContextId(1), Duration::from_millis(50));
        let hub = Rc::new(RefCell::new(HostHub::new()));
        hub.borrow_mut().indicator_index = Some(3);

        let reply = smol::block_on(smol::future::or(
            async { link.request(ContextRequest::FrameCount).await },
            async {
                HostHub::run(hub.clone(), rx).await;
                None
            },
        ));

        assert_eq!(
            reply,
            Some(HostReply::IndicatorIndex {
                indicator_index: Some(3)
            })
        );
    }

    #[test]
    fn test_record_notification_is_acked() {
        let (link, rx) = HostLink::channel(ContextId(1), Duration::from_millis(50));
        let hub = Rc::new(RefCell::new(HostHub::new()));

        let reply = smol::block_on(smol::future::or(
            async {
                link.request(ContextRequest::RecordNotification {
                    command: "click".to_string(),
                    target: "id=a".to_string(),
                    value: String::new(),
                })
                .await
            },
            async {
                HostHub::run(hub.clone(), rx).await;
                None
            },
        ));

        assert_eq!(reply, Some(HostReply::Ack(true)));
        assert_eq!(hub.borrow().notifications().len(), 1);
    }
}
