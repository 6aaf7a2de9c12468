#![forbid(unsafe_code)]

use tracing::debug;
use vigil_source::{ResolvedSource, SourceKind};

use crate::traits::{AdaptiveDecoder, MediaSurface};

/// Playback path chosen for one acquisition attempt.
///
/// Selected exactly once per open; the attempt never re-probes
/// capabilities mid-flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Software adaptive-stream decoder attached to the surface.
    Adaptive,
    /// The surface plays the URL directly.
    Native,
    /// Embedding surface (iframe) pointed at the URL.
    Embed,
    /// No playback path exists for this source on this runtime.
    Unsupported,
}

/// Pick the playback strategy for a resolved source, in priority order:
/// software adaptive decoder, then native surface playback, then page
/// embedding, else unsupported.
#[must_use]
pub fn select_strategy(
    source: &ResolvedSource,
    decoder: &dyn AdaptiveDecoder,
    surface: &dyn MediaSurface,
) -> Strategy {
    let strategy = select_inner(source, decoder, surface);
    debug!(kind = ?source.kind, ?strategy, "playback strategy selected");
    strategy
}

fn select_inner(
    source: &ResolvedSource,
    decoder: &dyn AdaptiveDecoder,
    surface: &dyn MediaSurface,
) -> Strategy {
    if source.effective.is_none() {
        return Strategy::Unsupported;
    }

    if source.kind == SourceKind::AdaptiveStream && decoder.is_supported() {
        return Strategy::Adaptive;
    }

    // Some runtimes play segmented streams natively even without the
    // software decoder, so the hint check covers adaptive sources too.
    if let Some(hint) = source.mime_hint() {
        if surface.can_play_natively(hint) {
            return Strategy::Native;
        }
    }

    if source.kind == SourceKind::Embed {
        return Strategy::Embed;
    }

    Strategy::Unsupported
}
