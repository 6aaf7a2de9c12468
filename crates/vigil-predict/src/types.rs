use std::{cmp::min, time::Duration};

use serde::{Deserialize, Serialize};

/// One detection above the confidence threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding box as `[x1, y1, x2, y2]` in image coordinates.
    pub bbox: [f64; 4],
    /// Model confidence, 0..=1.
    pub confidence: f64,
    /// Numeric class id reported by the model.
    pub class_id: u32,
    /// Class name, when the response's class map knows the id.
    pub label: Option<String>,
}

/// Exponential-backoff retry policy for inference requests.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential_delay = self.base_delay * 2_u32.pow(attempt.saturating_sub(1));
        min(exponential_delay, self.max_delay)
    }
}

/// Configuration for the inference client.
#[derive(Clone, Debug)]
pub struct PredictOptions {
    /// Detections below this confidence are dropped.
    pub confidence_threshold: f64,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl PredictOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
