#![forbid(unsafe_code)]

//! One acquisition attempt: resource ownership and outcome signalling.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::broadcast;
use tracing::{trace, warn};
use vigil_source::ResolvedSource;

use crate::{
    error::{PlaybackError, PlaybackResult},
    strategy::Strategy,
    traits::{AdaptiveDecoder, DecoderEvent, MediaSurface, SurfaceEvent},
};

/// First terminating signal produced by an attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackSignal {
    /// The source is playable; the play command may be issued.
    Ready,
    /// The backend reported an unrecoverable failure.
    Fatal { reason: String },
}

/// Owns everything allocated for one acquisition attempt.
///
/// Cheap to clone; all clones share the same underlying resources.
/// `destroy()` releases them exactly once no matter how often it is
/// called or from which clone, so close paths, timeout teardown, and
/// drop can all race it safely.
#[derive(Clone)]
pub struct AttemptHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    strategy: Strategy,
    decoder: Arc<dyn AdaptiveDecoder>,
    surface: Arc<dyn MediaSurface>,
    destroyed: AtomicBool,
}

impl AttemptHandle {
    /// The strategy this attempt was started with.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.inner.strategy
    }

    /// Whether the attempt's resources have been released.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    /// Issue the play command. Only meaningful after a ready signal.
    pub fn start_playback(&self) -> PlaybackResult<()> {
        if self.is_destroyed() {
            return Err(PlaybackError::Destroyed);
        }
        match self.inner.strategy {
            Strategy::Adaptive | Strategy::Native => self.inner.surface.play(),
            // The embedding surface starts on its own; nothing to issue.
            Strategy::Embed => Ok(()),
            Strategy::Unsupported => Err(PlaybackError::Unsupported),
        }
    }

    /// Release every resource wired up for this attempt. Idempotent.
    pub fn destroy(&self) {
        if self.inner.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.inner.strategy {
            Strategy::Adaptive => {
                self.inner.decoder.detach();
                trace!("attempt destroyed: decoder detached");
            }
            Strategy::Native => {
                self.inner.surface.clear();
                trace!("attempt destroyed: surface cleared");
            }
            Strategy::Embed | Strategy::Unsupported => {
                trace!("attempt destroyed: nothing to release");
            }
        }
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        if !self.destroyed.swap(true, Ordering::SeqCst) {
            warn!("attempt handle dropped without destroy; releasing resources");
            match self.strategy {
                Strategy::Adaptive => self.decoder.detach(),
                Strategy::Native => self.surface.clear(),
                Strategy::Embed | Strategy::Unsupported => {}
            }
        }
    }
}

/// The attempt's single event subscription, consumed by the acquisition
/// race. Dropping it unregisters the attempt from its backend's events.
pub struct SignalSource {
    inner: SignalInner,
}

enum SignalInner {
    Decoder(broadcast::Receiver<DecoderEvent>),
    Surface(broadcast::Receiver<SurfaceEvent>),
    Embed { ready_sent: bool },
}

impl SignalSource {
    /// Wait for the attempt's first terminating signal.
    ///
    /// Embed attempts report ready immediately: the embedding surface has
    /// no load signal of its own, so the attempt is considered playable as
    /// soon as it is mounted. After the first signal this pends forever;
    /// the race this feeds is decided by then.
    pub async fn next(&mut self) -> PlaybackSignal {
        match &mut self.inner {
            SignalInner::Decoder(rx) => loop {
                match rx.recv().await {
                    Ok(DecoderEvent::ManifestReady) => return PlaybackSignal::Ready,
                    Ok(DecoderEvent::FatalError { reason }) => {
                        return PlaybackSignal::Fatal { reason };
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "decoder event subscription lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return PlaybackSignal::Fatal {
                            reason: "decoder went away".to_string(),
                        };
                    }
                }
            },
            SignalInner::Surface(rx) => loop {
                match rx.recv().await {
                    Ok(SurfaceEvent::LoadedMetadata) => return PlaybackSignal::Ready,
                    Ok(SurfaceEvent::Error { reason }) => {
                        return PlaybackSignal::Fatal { reason };
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "surface event subscription lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        return PlaybackSignal::Fatal {
                            reason: "surface went away".to_string(),
                        };
                    }
                }
            },
            SignalInner::Embed { ready_sent } => {
                if *ready_sent {
                    std::future::pending().await
                } else {
                    *ready_sent = true;
                    PlaybackSignal::Ready
                }
            }
        }
    }
}

/// Wire up one acquisition attempt for an already-selected strategy.
///
/// Registers the attempt's event subscription before loading the source so
/// no signal can be missed, then starts the load. Playback itself is not
/// started here; the caller issues [`AttemptHandle::start_playback`] after
/// the ready signal wins the race.
pub fn begin_attempt(
    strategy: Strategy,
    source: &ResolvedSource,
    decoder: Arc<dyn AdaptiveDecoder>,
    surface: Arc<dyn MediaSurface>,
) -> PlaybackResult<(AttemptHandle, SignalSource)> {
    if strategy == Strategy::Unsupported {
        return Err(PlaybackError::Unsupported);
    }

    let url = source.effective.as_ref().ok_or(PlaybackError::NoUrl)?;

    let signals = match strategy {
        Strategy::Adaptive => {
            let rx = decoder.subscribe();
            decoder.attach_media()?;
            decoder.load_source(url)?;
            trace!(url = %url, "adaptive attempt started");
            SignalSource {
                inner: SignalInner::Decoder(rx),
            }
        }
        Strategy::Native => {
            let rx = surface.subscribe();
            surface.set_source(url)?;
            trace!(url = %url, "native attempt started");
            SignalSource {
                inner: SignalInner::Surface(rx),
            }
        }
        Strategy::Embed => {
            trace!(url = %url, "embed attempt started");
            SignalSource {
                inner: SignalInner::Embed { ready_sent: false },
            }
        }
        Strategy::Unsupported => unreachable!("rejected above"),
    };

    let handle = AttemptHandle {
        inner: Arc::new(HandleInner {
            strategy,
            decoder,
            surface,
            destroyed: AtomicBool::new(false),
        }),
    };

    Ok((handle, signals))
}

#[cfg(test)]
mod tests {
    use vigil_source::{resolve, SourceOptions};

    use super::*;
    use crate::testing::{ScriptedDecoder, ScriptedSurface};

    fn adaptive_source() -> ResolvedSource {
        resolve("https://h/s.m3u8", &SourceOptions::default())
    }

    fn native_source() -> ResolvedSource {
        resolve("https://h/clip.mp4", &SourceOptions::default())
    }

    #[tokio::test]
    async fn adaptive_attempt_attaches_and_loads() {
        let decoder = Arc::new(ScriptedDecoder::new(true));
        let surface = Arc::new(ScriptedSurface::new(false));

        let (handle, mut signals) = begin_attempt(
            Strategy::Adaptive,
            &adaptive_source(),
            decoder.clone(),
            surface,
        )
        .unwrap();

        assert_eq!(decoder.attach_calls(), 1);
        assert_eq!(decoder.loaded_urls().len(), 1);

        decoder.emit(DecoderEvent::ManifestReady);
        assert_eq!(signals.next().await, PlaybackSignal::Ready);

        handle.destroy();
        assert_eq!(decoder.detach_calls(), 1);
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let decoder = Arc::new(ScriptedDecoder::new(true));
        let surface = Arc::new(ScriptedSurface::new(false));

        let (handle, _signals) = begin_attempt(
            Strategy::Adaptive,
            &adaptive_source(),
            decoder.clone(),
            surface,
        )
        .unwrap();

        handle.destroy();
        handle.destroy();
        handle.destroy();
        assert_eq!(decoder.detach_calls(), 1);
        assert!(handle.is_destroyed());
    }

    #[tokio::test]
    async fn drop_releases_resources_once() {
        let decoder = Arc::new(ScriptedDecoder::new(true));
        let surface = Arc::new(ScriptedSurface::new(false));

        let (handle, signals) = begin_attempt(
            Strategy::Adaptive,
            &adaptive_source(),
            decoder.clone(),
            surface,
        )
        .unwrap();

        drop(signals);
        drop(handle);
        assert_eq!(decoder.detach_calls(), 1);
    }

    #[tokio::test]
    async fn native_attempt_signals_from_surface() {
        let decoder = Arc::new(ScriptedDecoder::new(false));
        let surface = Arc::new(ScriptedSurface::new(true));

        let (handle, mut signals) = begin_attempt(
            Strategy::Native,
            &native_source(),
            decoder,
            surface.clone(),
        )
        .unwrap();

        surface.emit(SurfaceEvent::Error {
            reason: "codec mismatch".to_string(),
        });
        assert!(matches!(
            signals.next().await,
            PlaybackSignal::Fatal { reason } if reason == "codec mismatch"
        ));

        handle.destroy();
        assert_eq!(surface.clear_calls(), 1);
    }

    #[tokio::test]
    async fn embed_attempt_is_ready_immediately() {
        let decoder = Arc::new(ScriptedDecoder::new(false));
        let surface = Arc::new(ScriptedSurface::new(false));

        let source = resolve("https://h/dashboard", &SourceOptions::default());
        let (handle, mut signals) =
            begin_attempt(Strategy::Embed, &source, decoder, surface).unwrap();

        assert_eq!(signals.next().await, PlaybackSignal::Ready);
        assert!(handle.start_playback().is_ok());
    }

    #[tokio::test]
    async fn play_after_destroy_is_refused() {
        let decoder = Arc::new(ScriptedDecoder::new(true));
        let surface = Arc::new(ScriptedSurface::new(false));

        let (handle, _signals) = begin_attempt(
            Strategy::Adaptive,
            &adaptive_source(),
            decoder,
            surface.clone(),
        )
        .unwrap();

        handle.destroy();
        assert!(matches!(
            handle.start_playback(),
            Err(PlaybackError::Destroyed)
        ));
        assert_eq!(surface.play_calls(), 0);
    }

    #[tokio::test]
    async fn unsupported_strategy_is_rejected() {
        let decoder = Arc::new(ScriptedDecoder::new(false));
        let surface = Arc::new(ScriptedSurface::new(false));

        let result = begin_attempt(
            Strategy::Unsupported,
            &adaptive_source(),
            decoder,
            surface,
        );
        assert!(matches!(result, Err(PlaybackError::Unsupported)));
    }
}
