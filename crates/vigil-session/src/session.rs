#![forbid(unsafe_code)]

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::{sync::watch, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use vigil_events::{EventBus, PreviewEvent};
use vigil_playback::{
    begin_attempt, select_strategy, AdaptiveDecoder, AttemptHandle, MediaSurface, PlaybackSignal,
    SignalSource, Strategy,
};
use vigil_source::resolve;

use crate::{
    options::SessionOptions,
    state::{AcquisitionState, FailureReason},
};

/// One preview request: the URL being acquired and when it was opened.
#[derive(Clone, Debug)]
pub struct StreamRequest {
    /// The operator-supplied URL, as stored on the camera record.
    pub url: String,
    /// When the preview was opened.
    pub opened_at: Instant,
}

/// Drives one preview widget through `Idle -> Loading -> {Playing, Failed}`.
///
/// The session owns at most one live attempt. Opening while an attempt is
/// in flight tears the old one down first; closing releases everything and
/// returns to `Idle`. All methods are synchronous; the ready/error/timeout
/// race runs on a spawned task, so `open` must be called from within a
/// tokio runtime.
pub struct PreviewSession {
    decoder: Arc<dyn AdaptiveDecoder>,
    surface: Arc<dyn MediaSurface>,
    options: SessionOptions,
    shared: Arc<Shared>,
    attempt: Option<Attempt>,
}

struct Shared {
    state: watch::Sender<AcquisitionState>,
    bus: EventBus,
    /// Token of the attempt allowed to settle the session. Bumped on every
    /// open and teardown so callbacks from superseded attempts are no-ops.
    generation: AtomicU64,
}

struct Attempt {
    generation: u64,
    request: StreamRequest,
    handle: AttemptHandle,
    cancel: CancellationToken,
}

impl PreviewSession {
    pub fn new(
        decoder: Arc<dyn AdaptiveDecoder>,
        surface: Arc<dyn MediaSurface>,
        options: SessionOptions,
        bus: EventBus,
    ) -> Self {
        let (state, _) = watch::channel(AcquisitionState::Idle);
        Self {
            decoder,
            surface,
            options,
            shared: Arc::new(Shared {
                state,
                bus,
                generation: AtomicU64::new(0),
            }),
            attempt: None,
        }
    }

    /// Current acquisition state.
    #[must_use]
    pub fn state(&self) -> AcquisitionState {
        self.shared.state.borrow().clone()
    }

    /// Watch state transitions.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<AcquisitionState> {
        self.shared.state.subscribe()
    }

    /// The request currently owning the widget, if any.
    #[must_use]
    pub fn request(&self) -> Option<&StreamRequest> {
        self.attempt.as_ref().map(|a| &a.request)
    }

    /// Open a preview for `raw_url`.
    ///
    /// A blank URL leaves the session in `Idle` (nothing to show). Any
    /// other input synchronously transitions to `Loading`, tearing down a
    /// previous attempt first, and eventually settles in exactly one of
    /// `Playing` or `Failed`. Acquisition failures become `Failed` state,
    /// never errors; re-opening after a failure restarts from scratch.
    pub fn open(&mut self, raw_url: &str) {
        let resolved = resolve(raw_url, &self.options.source);
        if resolved.is_empty() {
            // Nothing to show: tear down whatever was live and stay idle.
            trace!("open with blank URL; closing any live preview");
            self.close();
            return;
        }

        self.teardown_attempt();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let request = StreamRequest {
            url: resolved.raw.clone(),
            opened_at: Instant::now(),
        };

        self.shared.transition(AcquisitionState::Loading);
        self.shared.bus.publish(PreviewEvent::Opened {
            url: resolved.raw.clone(),
        });
        if let (Some(from), Some(to)) = (&resolved.rewritten_from, &resolved.effective) {
            self.shared.bus.publish(PreviewEvent::SourceRewritten {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        debug!(url = %resolved.raw, generation, "preview opened");

        if resolved.effective.is_none() {
            self.shared.settle(
                generation,
                AcquisitionState::Failed(FailureReason::Stream(format!(
                    "invalid URL: {}",
                    resolved.raw
                ))),
            );
            return;
        }

        let strategy = select_strategy(&resolved, &*self.decoder, &*self.surface);
        if strategy == Strategy::Unsupported {
            self.shared
                .settle(generation, AcquisitionState::Failed(FailureReason::Unsupported));
            return;
        }

        let (handle, signals) = match begin_attempt(
            strategy,
            &resolved,
            Arc::clone(&self.decoder),
            Arc::clone(&self.surface),
        ) {
            Ok(pair) => pair,
            Err(err) => {
                self.shared.settle(
                    generation,
                    AcquisitionState::Failed(FailureReason::Stream(err.to_string())),
                );
                return;
            }
        };

        let cancel = CancellationToken::new();
        tokio::spawn(run_acquisition(
            Arc::clone(&self.shared),
            generation,
            handle.clone(),
            signals,
            cancel.clone(),
            self.options.acquire_timeout,
        ));

        self.attempt = Some(Attempt {
            generation,
            request,
            handle,
            cancel,
        });
    }

    /// Close the preview: cancel the pending race, release the attempt's
    /// resources, and return to `Idle`. Idempotent.
    pub fn close(&mut self) {
        self.teardown_attempt();
        let closed = self.shared.state.send_if_modified(|state| {
            if state.is_idle() {
                return false;
            }
            *state = AcquisitionState::Idle;
            true
        });
        if closed {
            self.shared.bus.publish(PreviewEvent::Closed);
            debug!("preview closed");
        }
    }

    /// Synchronously release the current attempt, if any, and invalidate
    /// its pending callbacks.
    fn teardown_attempt(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            attempt.cancel.cancel();
            attempt.handle.destroy();
            trace!(generation = attempt.generation, "attempt torn down");
        }
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.teardown_attempt();
    }
}

impl Shared {
    /// Unconditional transition, used only from `open` for `Loading`.
    fn transition(&self, next: AcquisitionState) {
        self.state.send_replace(next);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Settle the request in a terminal state.
    ///
    /// No-op when the attempt is stale or the session already left
    /// `Loading`: first event wins, everything later is discarded.
    fn settle(&self, generation: u64, next: AcquisitionState) -> bool {
        if !self.is_current(generation) {
            trace!(generation, "stale attempt outcome discarded");
            return false;
        }
        let applied = self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = next.clone();
            true
        });
        if applied {
            match &next {
                AcquisitionState::Playing => self.bus.publish(PreviewEvent::Ready),
                AcquisitionState::Failed(reason) => {
                    debug!(%reason, "acquisition failed");
                    self.bus.publish(PreviewEvent::Failed {
                        reason: reason.as_str().to_string(),
                    });
                }
                AcquisitionState::Idle | AcquisitionState::Loading => {}
            }
        }
        applied
    }
}

/// Race the attempt's first signal against the timeout; first event wins.
async fn run_acquisition(
    shared: Arc<Shared>,
    generation: u64,
    handle: AttemptHandle,
    mut signals: SignalSource,
    cancel: CancellationToken,
    timeout: std::time::Duration,
) {
    let signal = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            // close() or a newer open already destroyed the handle.
            trace!(generation, "acquisition cancelled");
            return;
        }
        signal = signals.next() => signal,
        () = tokio::time::sleep(timeout) => {
            handle.destroy();
            shared.settle(
                generation,
                AcquisitionState::Failed(FailureReason::Timeout),
            );
            return;
        }
    };

    match signal {
        PlaybackSignal::Ready => {
            if !shared.is_current(generation) {
                trace!(generation, "ready from superseded attempt discarded");
                return;
            }
            match handle.start_playback() {
                Ok(()) => {
                    if !shared.settle(generation, AcquisitionState::Playing) {
                        handle.destroy();
                    }
                }
                Err(err) => {
                    handle.destroy();
                    shared.settle(
                        generation,
                        AcquisitionState::Failed(FailureReason::Stream(err.to_string())),
                    );
                }
            }
        }
        PlaybackSignal::Fatal { reason } => {
            handle.destroy();
            shared.settle(
                generation,
                AcquisitionState::Failed(FailureReason::Stream(reason)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use vigil_playback::testing::{ScriptedDecoder, ScriptedSurface};

    use super::*;

    fn session(decoder: Arc<ScriptedDecoder>, surface: Arc<ScriptedSurface>) -> PreviewSession {
        PreviewSession::new(
            decoder,
            surface,
            SessionOptions::default(),
            EventBus::new(16),
        )
    }

    #[tokio::test]
    async fn new_session_starts_idle() {
        let s = session(
            Arc::new(ScriptedDecoder::new(true)),
            Arc::new(ScriptedSurface::new(false)),
        );
        assert!(s.state().is_idle());
        assert!(s.request().is_none());
    }

    #[tokio::test]
    async fn open_records_the_request() {
        let mut s = session(
            Arc::new(ScriptedDecoder::new(true)),
            Arc::new(ScriptedSurface::new(false)),
        );
        s.open("https://cam.example.io/live.m3u8");
        assert_eq!(
            s.request().map(|r| r.url.as_str()),
            Some("https://cam.example.io/live.m3u8")
        );
    }

    #[tokio::test]
    async fn unsupported_source_fails_immediately() {
        // Stream URL, but neither a decoder nor native playback available.
        let mut s = session(
            Arc::new(ScriptedDecoder::new(false)),
            Arc::new(ScriptedSurface::new(false)),
        );
        s.open("https://cam.example.io/live.m3u8");
        assert_eq!(
            s.state(),
            AcquisitionState::Failed(FailureReason::Unsupported)
        );
    }

    #[tokio::test]
    async fn invalid_url_fails_as_stream_error() {
        let mut s = session(
            Arc::new(ScriptedDecoder::new(true)),
            Arc::new(ScriptedSurface::new(false)),
        );
        s.open("definitely not a url");
        assert!(matches!(
            s.state(),
            AcquisitionState::Failed(FailureReason::Stream(_))
        ));
    }
}
