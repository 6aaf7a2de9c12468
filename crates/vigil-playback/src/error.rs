#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while wiring or driving a playback attempt.
#[derive(Debug, Error, Clone)]
pub enum PlaybackError {
    #[error("no viable playback path for this source")]
    Unsupported,

    #[error("source has no loadable URL")]
    NoUrl,

    #[error("attempt already destroyed")]
    Destroyed,

    #[error("decoder error: {0}")]
    Decoder(String),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type PlaybackResult<T> = Result<T, PlaybackError>;
