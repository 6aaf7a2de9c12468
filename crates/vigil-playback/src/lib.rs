#![forbid(unsafe_code)]

//! Playback strategy selection and attempt lifecycle for stream previews.
//!
//! The preview widget never talks to a decoder or a media surface directly.
//! It picks a [`Strategy`] once per open, starts one acquisition attempt
//! through [`begin_attempt`], and waits on the attempt's [`SignalSource`]
//! for the first playable / fatal signal. The returned [`AttemptHandle`]
//! owns every resource wired up for the attempt and releases them all in
//! one idempotent `destroy()`.

mod attempt;
mod error;
mod strategy;
mod traits;

pub mod testing;

pub use attempt::{begin_attempt, AttemptHandle, PlaybackSignal, SignalSource};
pub use error::{PlaybackError, PlaybackResult};
pub use strategy::{select_strategy, Strategy};
pub use traits::{AdaptiveDecoder, DecoderEvent, MediaSurface, SurfaceEvent};

#[cfg(any(test, feature = "test-utils"))]
pub use traits::{AdaptiveDecoderMock, MediaSurfaceMock};
