use thiserror::Error;

/// Centralized error type for vigil-predict.
#[derive(Debug, Error, Clone)]
pub enum PredictError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Timeout")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed after {max_retries} retries: {source}")]
    RetryExhausted {
        max_retries: u32,
        source: Box<PredictError>,
    },
}

impl PredictError {
    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::Timeout
    }

    /// Creates an HTTP error from a generic string.
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    /// Checks if this error is considered retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            PredictError::Timeout => true,
            PredictError::HttpStatus { status, .. } => {
                // Retry on 5xx server errors plus 429/408.
                *status >= 500 || *status == 429 || *status == 408
            }
            PredictError::Http(msg) => {
                msg.contains("timeout") || msg.contains("connection") || msg.contains("network")
            }
            PredictError::InvalidRequest(_)
            | PredictError::InvalidResponse(_)
            | PredictError::RetryExhausted { .. } => false,
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error.to_string())
        }
    }
}

pub type PredictResult<T> = Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PredictError::Timeout, true)]
    #[case(PredictError::HttpStatus { status: 503, url: "http://m/predict".into() }, true)]
    #[case(PredictError::HttpStatus { status: 429, url: "http://m/predict".into() }, true)]
    #[case(PredictError::HttpStatus { status: 404, url: "http://m/predict".into() }, false)]
    #[case(PredictError::Http("connection reset".into()), true)]
    #[case(PredictError::InvalidResponse("not json".into()), false)]
    fn retryability(#[case] error: PredictError, #[case] expected: bool) {
        assert_eq!(error.is_retryable(), expected);
    }
}
