#![forbid(unsafe_code)]

/// Events emitted by the inference client.
#[derive(Clone, Debug)]
pub enum PredictEvent {
    /// An image was submitted to the inference endpoint.
    Requested { endpoint: String },
    /// The endpoint answered; count of detections above the threshold.
    Completed { detections: usize },
    /// The request failed after retries were exhausted.
    Failed { error: String },
}
