#![forbid(unsafe_code)]

use thiserror::Error;

use crate::types::CameraId;

/// Camera registry errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("camera not found: {0:?}")]
    NotFound(CameraId),

    #[error("invalid camera record: {0}")]
    Invalid(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
