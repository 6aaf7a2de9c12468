#![forbid(unsafe_code)]

//! Client for the external image-inference endpoint.
//!
//! The console lets an operator upload a frame and run it against the
//! detection model linked to a camera (`POST /predict`, multipart field
//! `image`). The endpoint answers with raw prediction rows and a class-id
//! map; this crate turns that into typed [`Detection`]s, filtered by a
//! confidence threshold, with bounded retry on transient failures.

mod client;
mod error;
mod transport;
mod types;

pub use client::PredictClient;
pub use error::{PredictError, PredictResult};
pub use transport::{HttpTransport, PredictTransport};
pub use types::{Detection, PredictOptions, RetryPolicy};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::PredictTransportMock;
