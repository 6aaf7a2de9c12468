#![forbid(unsafe_code)]

use crate::{
    error::RegistryResult,
    types::{Camera, CameraId, CameraStatus, NewCamera},
};

/// Create/read/delete over camera records.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = CameraRegistryMock)
)]
pub trait CameraRegistry: Send + Sync {
    /// Create a record; the registry assigns and returns the id.
    fn add(&self, camera: NewCamera) -> RegistryResult<Camera>;

    /// Fetch one record.
    fn get(&self, id: CameraId) -> RegistryResult<Camera>;

    /// All records, in insertion order.
    fn list(&self) -> Vec<Camera>;

    /// Delete a record.
    fn remove(&self, id: CameraId) -> RegistryResult<()>;

    /// Flip a camera's monitored flag.
    fn set_status(&self, id: CameraId, status: CameraStatus) -> RegistryResult<()>;
}
