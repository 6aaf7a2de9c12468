#![forbid(unsafe_code)]

use std::time::Duration;

use vigil_source::SourceOptions;

/// How long an attempt may stay in `Loading` before it fails with a
/// timeout. A tunable bound, not a protocol requirement.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(8);

/// Configuration for a [`PreviewSession`](crate::PreviewSession).
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Bound on the ready/error/timeout race.
    pub acquire_timeout: Duration,
    /// Source classification options (demo rewrites and friends).
    pub source: SourceOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            source: SourceOptions::default(),
        }
    }
}

impl SessionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acquisition timeout.
    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Set the source classification options.
    #[must_use]
    pub fn with_source(mut self, source: SourceOptions) -> Self {
        self.source = source;
        self
    }
}
