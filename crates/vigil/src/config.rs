#![forbid(unsafe_code)]

//! Configuration for [`Preview`](crate::Preview).

use std::time::Duration;

use vigil_events::EventBus;
use vigil_session::SessionOptions;
use vigil_source::SourceOptions;

/// Unified configuration for creating a [`Preview`](crate::Preview).
///
/// # Example
///
/// ```ignore
/// use vigil::PreviewConfig;
///
/// let config = PreviewConfig::new()
///     .with_acquire_timeout(std::time::Duration::from_secs(5))
///     .with_demo_rewrites(true);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PreviewConfig {
    /// Bound on the ready/error/timeout race. Defaults to
    /// [`vigil_session::DEFAULT_ACQUIRE_TIMEOUT`].
    pub acquire_timeout: Option<Duration>,
    /// Substitute placeholder hosts with the demo fallback stream.
    pub demo_rewrites: bool,
    /// Event bus shared with the rest of the console. A private bus is
    /// created when not provided.
    pub bus: Option<EventBus>,
}

impl PreviewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the acquisition timeout.
    #[must_use]
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    /// Enable the demo-URL rewrite for placeholder hosts.
    #[must_use]
    pub fn with_demo_rewrites(mut self, enabled: bool) -> Self {
        self.demo_rewrites = enabled;
        self
    }

    /// Share an event bus with the rest of the console.
    #[must_use]
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    // -- Internal conversions -------------------------------------------------

    pub(crate) fn into_parts(self) -> (SessionOptions, EventBus) {
        let mut options = SessionOptions::new()
            .with_source(SourceOptions::new().with_demo_rewrites(self.demo_rewrites));
        if let Some(timeout) = self.acquire_timeout {
            options = options.with_acquire_timeout(timeout);
        }
        let bus = self.bus.unwrap_or_default();
        (options, bus)
    }
}
