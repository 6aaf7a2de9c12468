#![forbid(unsafe_code)]

//! Scripted capability providers for testing acquisition flows.
//!
//! Each double is a spy and a script in one: tests configure the
//! capability answers up front, emit lifecycle events at the instants the
//! scenario calls for, and read back call counts to assert resource
//! hygiene (every attach matched by a detach, playback only started after
//! ready).

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use url::Url;

use crate::{
    error::PlaybackResult,
    traits::{AdaptiveDecoder, DecoderEvent, MediaSurface, SurfaceEvent},
};

const EVENT_CAPACITY: usize = 16;

/// Scripted adaptive-stream decoder.
pub struct ScriptedDecoder {
    supported: bool,
    events: broadcast::Sender<DecoderEvent>,
    attach_calls: AtomicUsize,
    detach_calls: AtomicUsize,
    loaded: Mutex<Vec<Url>>,
}

impl ScriptedDecoder {
    #[must_use]
    pub fn new(supported: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            supported,
            events,
            attach_calls: AtomicUsize::new(0),
            detach_calls: AtomicUsize::new(0),
            loaded: Mutex::new(Vec::new()),
        }
    }

    /// Emit a decoder event to every live attempt subscription.
    pub fn emit(&self, event: DecoderEvent) {
        let _ = self.events.send(event);
    }

    #[must_use]
    pub fn attach_calls(&self) -> usize {
        self.attach_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn detach_calls(&self) -> usize {
        self.detach_calls.load(Ordering::SeqCst)
    }

    /// URLs passed to `load_source`, in call order.
    #[must_use]
    pub fn loaded_urls(&self) -> Vec<Url> {
        self.loaded.lock().clone()
    }
}

impl AdaptiveDecoder for ScriptedDecoder {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn attach_media(&self) -> PlaybackResult<()> {
        self.attach_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load_source(&self, url: &Url) -> PlaybackResult<()> {
        self.loaded.lock().push(url.clone());
        Ok(())
    }

    fn detach(&self) {
        self.detach_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe(&self) -> broadcast::Receiver<DecoderEvent> {
        self.events.subscribe()
    }
}

/// Scripted native media surface.
pub struct ScriptedSurface {
    can_play: bool,
    events: broadcast::Sender<SurfaceEvent>,
    set_source_calls: AtomicUsize,
    play_calls: AtomicUsize,
    clear_calls: AtomicUsize,
}

impl ScriptedSurface {
    #[must_use]
    pub fn new(can_play: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            can_play,
            events,
            set_source_calls: AtomicUsize::new(0),
            play_calls: AtomicUsize::new(0),
            clear_calls: AtomicUsize::new(0),
        }
    }

    /// Emit a surface event to every live attempt subscription.
    pub fn emit(&self, event: SurfaceEvent) {
        let _ = self.events.send(event);
    }

    #[must_use]
    pub fn set_source_calls(&self) -> usize {
        self.set_source_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn play_calls(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

impl MediaSurface for ScriptedSurface {
    fn can_play_natively(&self, _mime_hint: &str) -> bool {
        self.can_play
    }

    fn set_source(&self, _url: &Url) -> PlaybackResult<()> {
        self.set_source_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn play(&self) -> PlaybackResult<()> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn subscribe(&self) -> broadcast::Receiver<SurfaceEvent> {
        self.events.subscribe()
    }
}
