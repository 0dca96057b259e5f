//! Host Link
//!
//! Context side of the asynchronous host channel. Notices are
//! fire-and-forget; requests race a reply against a deadline. Both
//! tolerate a missing host, which races normal page unload.

use std::time::Duration;

use smol::channel::{Receiver, Sender, bounded, unbounded};

use crate::{ContextId, ContextNotice, ContextRequest, HostReply};

/// One message as seen by the host side of the channel
#[derive(Debug)]
pub enum Envelope {
    Notice {
        from: ContextId,
        notice: ContextNotice,
    },
    Request {
        from: ContextId,
        request: ContextRequest,
        reply: Sender<HostReply>,
    },
}

/// Clonable handle a rendering context uses to talk to the host
#[derive(Debug, Clone)]
pub struct HostLink {
    from: ContextId,
    tx: Sender<Envelope>,
    timeout: Duration,
}

impl HostLink {
    /// Create a link plus the host-side receiver
    pub fn channel(from: ContextId, timeout: Duration) -> (Self, Receiver<Envelope>) {
        let (tx, rx) = unbounded();
        (Self { from, tx, timeout }, rx)
    }

    /// Link a further context onto an existing host channel
    pub fn attach(from: ContextId, tx: Sender<Envelope>, timeout: Duration) -> Self {
        Self { from, tx, timeout }
    }

    /// Host-side sender, for attaching further contexts
    pub fn sender(&self) -> Sender<Envelope> {
        self.tx.clone()
    }

    /// Context this link speaks for
    pub fn context(&self) -> ContextId {
        self.from
    }

    /// Reply deadline for [`HostLink::request`]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fire-and-forget notice. A closed channel means the host is gone,
    /// which is not an error here.
    pub fn notify(&self, notice: ContextNotice) {
        let envelope = Envelope::Notice {
            from: self.from,
            notice,
        };
        if self.tx.try_send(envelope).is_err() {
            tracing::debug!("host channel closed, notice dropped");
        }
    }

    /// Request with a reply deadline. `None` covers both a missing host
    /// and a reply that never arrives in time.
    pub async fn request(&self, request: ContextRequest) -> Option<HostReply> {
        let (reply_tx, reply_rx) = bounded(1);
        let envelope = Envelope::Request {
            from: self.from,
            request,
            reply: reply_tx,
        };
        if self.tx.try_send(envelope).is_err() {
            tracing::debug!("host channel closed, request dropped");
            return None;
        }

        let reply = async { reply_rx.recv().await.ok() };
        let deadline = async {
            smol::Timer::after(self.timeout).await;
            None
        };
        smol::future::or(reply, deadline).await
    }
}
