//! Runtime Configuration

use std::time::Duration;

use serde::Deserialize;
use wrec_ipc::RetryPolicy;

/// Recorder runtime options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Deadline for host round trips
    pub request_timeout: Duration,

    /// Panel-readiness polling
    pub panel_poll: RetryPolicy,

    /// Delay before re-adding the indicator during recalculation
    pub indicator_settle: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(250),
            panel_poll: RetryPolicy::default(),
            indicator_settle: Duration::from_millis(100),
        }
    }
}
