#![forbid(unsafe_code)]

//! # Vigil
//!
//! Facade crate for the stream-preview layer of a camera monitoring
//! console: source classification, playback strategy selection, the
//! acquisition state machine, and the collaborators around it (camera
//! registry, inference client).
//!
//! ## Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use vigil::prelude::*;
//!
//! let mut preview = Preview::new(PreviewConfig::new(), decoder, surface);
//! preview.open("https://cams.example.io/hall/master.m3u8");
//!
//! // Render whatever the acquisition state says.
//! match preview.view() {
//!     SurfaceView::Connecting { message } => show_spinner(message),
//!     SurfaceView::Video { .. } => show_video(),
//!     SurfaceView::ErrorPanel { message, .. } => show_error(message),
//!     SurfaceView::Hidden => {}
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod events {
    pub use vigil_events::*;
}

pub mod playback {
    pub use vigil_playback::*;
}

pub mod predict {
    pub use vigil_predict::*;
}

pub mod registry {
    pub use vigil_registry::*;
}

pub mod session {
    pub use vigil_session::*;
}

pub mod source {
    pub use vigil_source::*;
}

pub mod surface {
    pub use vigil_surface::*;
}

// ── Preview widget ──────────────────────────────────────────────────────

mod config;
mod preview;

pub use config::PreviewConfig;
pub use preview::Preview;

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use vigil_events::{Event, EventBus, PreviewEvent};
    pub use vigil_playback::{AdaptiveDecoder, MediaSurface, Strategy};
    pub use vigil_registry::{Camera, CameraRegistry, MemoryRegistry, NewCamera};
    pub use vigil_session::{AcquisitionState, FailureReason};
    pub use vigil_surface::SurfaceView;

    pub use crate::{Preview, PreviewConfig};
}
