//! Panel Readiness
//!
//! The editor panel opens in its own window and recording cannot start
//! until its single tab reports complete. The wait is a bounded poll:
//! exhausting the budget surfaces an explicit error, it never retries
//! forever.

use std::cell::Cell;
use std::rc::Rc;

use wrec_ipc::{RetryPolicy, WaitTimeout, wait_until};

/// Panel window lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    /// Window created, tab still loading
    #[default]
    Opening,
    /// Single tab loaded and reachable
    Ready,
    /// Window closed
    Closed,
}

/// Shared view of the panel window's phase
#[derive(Debug, Clone, Default)]
pub struct PanelHandle {
    phase: Rc<Cell<PanelPhase>>,
}

impl PanelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase.get()
    }

    pub fn is_ready(&self) -> bool {
        self.phase.get() == PanelPhase::Ready
    }

    /// The panel tab finished loading
    pub fn mark_ready(&self) {
        self.phase.set(PanelPhase::Ready);
    }

    /// The panel window went away
    pub fn close(&self) {
        self.phase.set(PanelPhase::Closed);
    }
}

/// Wait until the panel reports ready, polling per `policy`
pub async fn wait_for_panel(panel: &PanelHandle, policy: RetryPolicy) -> Result<(), WaitTimeout> {
    let result = wait_until(policy, || panel.is_ready().then_some(())).await;
    if result.is_err() {
        tracing::warn!(
            attempts = policy.max_attempts,
            "panel never became ready"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(1), max_attempts)
    }

    #[test]
    fn test_ready_panel_resolves_immediately() {
        let panel = PanelHandle::new();
        panel.mark_ready();

        let result = smol::block_on(wait_for_panel(&panel, fast(3)));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_missing_panel_fails_after_budget() {
        let panel = PanelHandle::new();

        let result = smol::block_on(wait_for_panel(&panel, fast(3)));
        assert_eq!(result, Err(WaitTimeout { attempts: 3 }));
    }

    #[test]
    fn test_panel_becoming_ready_mid_poll() {
        let panel = PanelHandle::new();
        let watcher = panel.clone();

        let result = smol::block_on(async {
            let ready = async {
                smol::Timer::after(Duration::from_millis(3)).await;
                watcher.mark_ready();
                smol::future::pending().await
            };
            smol::future::or(wait_for_panel(&panel, fast(50)), ready).await
        });
        assert_eq!(result, Ok(()));
    }
}
