#![forbid(unsafe_code)]

//! Camera registry: the records the preview layer consumes.
//!
//! A camera record carries the stream URL the operator registered plus an
//! optional detection-API endpoint. The preview widget only ever reads
//! `url`; everything else is for the surrounding console. The in-memory
//! implementation backs tests and single-process deployments; remote
//! document stores implement [`CameraRegistry`] behind the same seam.

mod error;
mod memory;
mod traits;
mod types;

pub use error::{RegistryError, RegistryResult};
pub use memory::MemoryRegistry;
pub use traits::CameraRegistry;
pub use types::{Camera, CameraId, CameraStatus, NewCamera};

#[cfg(any(test, feature = "test-utils"))]
pub use traits::CameraRegistryMock;
