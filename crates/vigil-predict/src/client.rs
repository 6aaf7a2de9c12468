use std::collections::HashMap;

use bytes::Bytes;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;
use vigil_events::{EventBus, PredictEvent};

use crate::{
    error::{PredictError, PredictResult},
    transport::PredictTransport,
    types::{Detection, PredictOptions},
};

/// Response shape of the inference service: raw prediction rows
/// `[x1, y1, x2, y2, confidence, class]` plus a class-id -> name map.
#[derive(Debug, Deserialize)]
struct RawResponse {
    predictions: Vec<Vec<f64>>,
    #[serde(default)]
    classes: HashMap<String, String>,
}

/// Inference client: multipart upload, bounded retry, typed detections.
pub struct PredictClient<T> {
    transport: T,
    options: PredictOptions,
    bus: Option<EventBus>,
}

impl<T: PredictTransport> PredictClient<T> {
    pub fn new(transport: T, options: PredictOptions) -> Self {
        Self {
            transport,
            options,
            bus: None,
        }
    }

    /// Publish predict events on the given bus.
    #[must_use]
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    fn publish(&self, event: PredictEvent) {
        if let Some(bus) = &self.bus {
            bus.publish(event);
        }
    }

    /// Run one image against the endpoint.
    ///
    /// Transient failures (timeouts, 5xx, 429) are retried with
    /// exponential backoff up to the configured bound; everything else
    /// fails immediately. Detections below the confidence threshold are
    /// dropped.
    pub async fn predict(
        &self,
        endpoint: &Url,
        image: Bytes,
        filename: &str,
    ) -> PredictResult<Vec<Detection>> {
        self.publish(PredictEvent::Requested {
            endpoint: endpoint.to_string(),
        });

        let body = match self.post_with_retry(endpoint, image, filename).await {
            Ok(body) => body,
            Err(err) => {
                self.publish(PredictEvent::Failed {
                    error: err.to_string(),
                });
                return Err(err);
            }
        };

        let detections = parse_response(&body, self.options.confidence_threshold)?;
        debug!(
            endpoint = %endpoint,
            detections = detections.len(),
            "inference completed"
        );
        self.publish(PredictEvent::Completed {
            detections: detections.len(),
        });
        Ok(detections)
    }

    async fn post_with_retry(
        &self,
        endpoint: &Url,
        image: Bytes,
        filename: &str,
    ) -> PredictResult<Bytes> {
        let retry = &self.options.retry;
        let mut last_error = None;

        for attempt in 0..=retry.max_retries {
            match self
                .transport
                .post_image(endpoint.clone(), image.clone(), filename)
                .await
            {
                Ok(body) => return Ok(body),
                Err(error) => {
                    if !error.is_retryable() || attempt >= retry.max_retries {
                        return Err(error);
                    }
                    warn!(attempt, error = %error, "inference request failed; retrying");
                    last_error = Some(error);
                    sleep(retry.delay_for_attempt(attempt + 1)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| PredictError::RetryExhausted {
            max_retries: retry.max_retries,
            source: Box::new(PredictError::Timeout),
        }))
    }
}

/// Parse the service response and drop rows below `threshold`.
fn parse_response(body: &[u8], threshold: f64) -> PredictResult<Vec<Detection>> {
    let raw: RawResponse = serde_json::from_slice(body)
        .map_err(|e| PredictError::InvalidResponse(e.to_string()))?;

    let mut detections = Vec::with_capacity(raw.predictions.len());
    for row in &raw.predictions {
        let [x1, y1, x2, y2, confidence, class] = row.as_slice() else {
            return Err(PredictError::InvalidResponse(format!(
                "prediction row has {} values, expected 6",
                row.len()
            )));
        };

        if *confidence < threshold {
            continue;
        }

        let class_id = *class as u32;
        detections.push(Detection {
            bbox: [*x1, *y1, *x2, *y2],
            confidence: *confidence,
            class_id,
            label: raw.classes.get(&class_id.to_string()).cloned(),
        });
    }

    Ok(detections)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;
    use unimock::{matching, MockFn, Unimock};

    use super::*;
    use crate::transport::PredictTransportMock;
    use crate::types::RetryPolicy;

    const RESPONSE: &str = r#"{
        "predictions": [
            [10.0, 20.0, 110.0, 220.0, 0.92, 0.0],
            [5.0, 5.0, 50.0, 50.0, 0.31, 1.0]
        ],
        "classes": {"0": "person", "1": "phone"}
    }"#;

    fn endpoint() -> Url {
        Url::parse("https://model.example.io/predict").unwrap()
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(10))
    }

    // parse_response

    #[test]
    fn parse_filters_below_threshold_and_labels_classes() {
        let detections = parse_response(RESPONSE.as_bytes(), 0.5).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label.as_deref(), Some("person"));
        assert_eq!(detections[0].bbox, [10.0, 20.0, 110.0, 220.0]);
    }

    #[test]
    fn parse_keeps_everything_at_zero_threshold() {
        let detections = parse_response(RESPONSE.as_bytes(), 0.0).unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[1].label.as_deref(), Some("phone"));
    }

    #[test]
    fn parse_tolerates_unknown_class_ids() {
        let body = r#"{"predictions": [[0.0, 0.0, 1.0, 1.0, 0.9, 7.0]], "classes": {}}"#;
        let detections = parse_response(body.as_bytes(), 0.5).unwrap();
        assert_eq!(detections[0].class_id, 7);
        assert!(detections[0].label.is_none());
    }

    #[rstest]
    #[case(r#"not json"#)]
    #[case(r#"{"predictions": [[1.0, 2.0, 3.0]]}"#)]
    fn parse_rejects_malformed_bodies(#[case] body: &str) {
        assert!(matches!(
            parse_response(body.as_bytes(), 0.5),
            Err(PredictError::InvalidResponse(_))
        ));
    }

    // client retry behavior

    #[tokio::test]
    async fn success_on_first_attempt() {
        let mock = Unimock::new(
            PredictTransportMock::post_image
                .some_call(matching!(_, _, _))
                .returns(Ok(Bytes::from_static(RESPONSE.as_bytes()))),
        );
        let client = PredictClient::new(mock, PredictOptions::default());

        let detections = client
            .predict(&endpoint(), Bytes::from_static(b"jpeg"), "frame.jpg")
            .await
            .unwrap();
        assert_eq!(detections.len(), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_then_succeeds() {
        let mock = Unimock::new((
            PredictTransportMock::post_image
                .next_call(matching!(_, _, _))
                .returns(Err(PredictError::Timeout)),
            PredictTransportMock::post_image
                .next_call(matching!(_, _, _))
                .returns(Err(PredictError::HttpStatus {
                    status: 503,
                    url: "https://model.example.io/predict".into(),
                })),
            PredictTransportMock::post_image
                .next_call(matching!(_, _, _))
                .returns(Ok(Bytes::from_static(RESPONSE.as_bytes()))),
        ));
        let options = PredictOptions::new().with_retry(fast_retry());
        let client = PredictClient::new(mock, options);

        let detections = client
            .predict(&endpoint(), Bytes::from_static(b"jpeg"), "frame.jpg")
            .await
            .unwrap();
        assert_eq!(detections.len(), 1);
    }

    #[tokio::test]
    async fn non_retryable_status_fails_immediately() {
        let mock = Unimock::new(
            PredictTransportMock::post_image
                .some_call(matching!(_, _, _))
                .returns(Err(PredictError::HttpStatus {
                    status: 404,
                    url: "https://model.example.io/predict".into(),
                })),
        );
        let options = PredictOptions::new().with_retry(fast_retry());
        let client = PredictClient::new(mock, options);

        let result = client
            .predict(&endpoint(), Bytes::from_static(b"jpeg"), "frame.jpg")
            .await;
        assert!(matches!(
            result,
            Err(PredictError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_last_error() {
        let mock = Unimock::new(
            PredictTransportMock::post_image
                .each_call(matching!(_, _, _))
                .returns(Err(PredictError::Timeout)),
        );
        let options =
            PredictOptions::new().with_retry(RetryPolicy::new(2, Duration::from_millis(1), Duration::from_millis(5)));
        let client = PredictClient::new(mock, options);

        let result = client
            .predict(&endpoint(), Bytes::from_static(b"jpeg"), "frame.jpg")
            .await;
        assert!(matches!(result, Err(PredictError::Timeout)));
    }

    #[tokio::test]
    async fn events_are_published_for_the_round_trip() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let mock = Unimock::new(
            PredictTransportMock::post_image
                .some_call(matching!(_, _, _))
                .returns(Ok(Bytes::from_static(RESPONSE.as_bytes()))),
        );
        let client = PredictClient::new(mock, PredictOptions::default()).with_bus(bus);

        client
            .predict(&endpoint(), Bytes::from_static(b"jpeg"), "frame.jpg")
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            vigil_events::Event::Predict(PredictEvent::Requested { .. })
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            vigil_events::Event::Predict(PredictEvent::Completed { detections: 1 })
        ));
    }
}
