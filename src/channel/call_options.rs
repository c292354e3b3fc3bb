use std::time::Duration;

/// Per-call settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// How long to wait for the response. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Options with a timeout given in milliseconds, the unit used by
    /// JavaScript peers.
    pub const fn from_millis(timeout_ms: u64) -> Self {
        Self {
            timeout: Some(Duration::from_millis(timeout_ms)),
        }
    }
}
