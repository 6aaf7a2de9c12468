#![forbid(unsafe_code)]

//! Acquisition state machine for camera stream previews.
//!
//! One [`PreviewSession`] drives one preview widget: `open(url)` starts an
//! acquisition attempt and races the backend's ready/fatal signals against
//! a bounded timeout; the first event wins and settles the session in
//! `Playing` or `Failed`. Every exit path (close, URL change, timeout,
//! drop) releases the attempt's resources exactly once, and a generation
//! token makes late signals from superseded attempts no-ops.

mod options;
mod session;
mod state;

pub use options::{SessionOptions, DEFAULT_ACQUIRE_TIMEOUT};
pub use session::{PreviewSession, StreamRequest};
pub use state::{AcquisitionState, FailureReason};
