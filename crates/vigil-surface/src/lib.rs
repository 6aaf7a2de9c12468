#![forbid(unsafe_code)]

//! Pure view model for the stream preview surface.
//!
//! Maps an [`AcquisitionState`] to what the host should draw. No variant
//! performs I/O; every side effect lives in the session and playback
//! layers.

mod view;

pub use view::{render, SurfaceIcon, SurfaceView, CONNECTING_MESSAGE, ERROR_MESSAGE};
