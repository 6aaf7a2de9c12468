#![forbid(unsafe_code)]

//! Capability-provider traits for the two playback backends.
//!
//! Both are consumed as black boxes: an adaptive-stream decoder library
//! (manifest parsing, segment fetching) and the native media surface the
//! host embeds the widget into. Implementations publish their lifecycle
//! events on a broadcast channel; each acquisition attempt takes exactly
//! one subscription and drops it on teardown.

use tokio::sync::broadcast;
use url::Url;

use crate::error::PlaybackResult;

/// Events emitted by an adaptive-stream decoder.
#[derive(Clone, Debug)]
pub enum DecoderEvent {
    /// The manifest was parsed and the stream is playable.
    ManifestReady,
    /// Unrecoverable decoder failure (bad URL, unreachable host, codec
    /// mismatch).
    FatalError { reason: String },
}

/// Events emitted by the native media surface.
#[derive(Clone, Debug)]
pub enum SurfaceEvent {
    /// The surface loaded enough of the source to start playback.
    LoadedMetadata,
    /// The surface failed to load or decode the source.
    Error { reason: String },
}

/// Client-side adaptive-stream decoder, consumed as a black box.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = AdaptiveDecoderMock)
)]
pub trait AdaptiveDecoder: Send + Sync {
    /// Whether the runtime can run the software decoder at all.
    fn is_supported(&self) -> bool;

    /// Attach the decoder to the media surface.
    fn attach_media(&self) -> PlaybackResult<()>;

    /// Start loading the given manifest URL.
    fn load_source(&self, url: &Url) -> PlaybackResult<()>;

    /// Detach from the surface and free decoder resources.
    fn detach(&self);

    /// Subscribe to decoder lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<DecoderEvent>;
}

/// The native media surface and its playback primitives.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = MediaSurfaceMock)
)]
pub trait MediaSurface: Send + Sync {
    /// Whether the surface can play the given container type directly.
    fn can_play_natively(&self, mime_hint: &str) -> bool;

    /// Point the surface at a source URL.
    fn set_source(&self, url: &Url) -> PlaybackResult<()>;

    /// Issue the play command. Only called after a ready signal.
    fn play(&self) -> PlaybackResult<()>;

    /// Blank the surface and drop the current source.
    fn clear(&self);

    /// Subscribe to surface lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent>;
}
