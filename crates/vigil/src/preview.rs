#![forbid(unsafe_code)]

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use vigil_events::{Event, EventBus};
use vigil_playback::{AdaptiveDecoder, MediaSurface};
use vigil_registry::Camera;
use vigil_session::{AcquisitionState, PreviewSession};
use vigil_surface::{render, SurfaceView};

use crate::config::PreviewConfig;

/// The stream preview widget.
///
/// Thin shell over the acquisition session: `open`/`close` drive the
/// state machine, `view()` is the pure projection the host renders.
/// One widget instance owns one session; nothing is shared across
/// instances.
pub struct Preview {
    session: PreviewSession,
    bus: EventBus,
}

impl Preview {
    /// Create a widget wired to the runtime's playback capabilities.
    pub fn new(
        config: PreviewConfig,
        decoder: Arc<dyn AdaptiveDecoder>,
        surface: Arc<dyn MediaSurface>,
    ) -> Self {
        let (options, bus) = config.into_parts();
        let session = PreviewSession::new(decoder, surface, options, bus.clone());
        Self { session, bus }
    }

    /// Open a preview for a raw URL. See
    /// [`PreviewSession::open`](vigil_session::PreviewSession::open).
    pub fn open(&mut self, raw_url: &str) {
        self.session.open(raw_url);
    }

    /// Open a preview for a registered camera. Only the record's `url` is
    /// consumed.
    pub fn open_camera(&mut self, camera: &Camera) {
        self.session.open(&camera.url);
    }

    /// Close the preview and release all attempt resources. Idempotent.
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Current acquisition state.
    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        self.session.state()
    }

    /// Watch acquisition state transitions.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<AcquisitionState> {
        self.session.watch_state()
    }

    /// What the host should draw right now.
    #[must_use]
    pub fn view(&self) -> SurfaceView {
        render(&self.session.state())
    }

    /// Subscribe to the widget's event bus.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The event bus this widget publishes on.
    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}
