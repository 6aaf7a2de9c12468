use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use crate::error::{PredictError, PredictResult};

/// Wire-level access to an inference endpoint.
///
/// One method, one shape: multipart POST of the image, raw response body
/// back. Parsing and retry live in the client so transports stay dumb.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = PredictTransportMock)
)]
#[async_trait]
pub trait PredictTransport: Send + Sync {
    /// POST `image` as the multipart field `image` and return the body.
    async fn post_image(&self, endpoint: Url, image: Bytes, filename: &str)
        -> PredictResult<Bytes>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    inner: reqwest::Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// # Panics
    ///
    /// Panics if the `reqwest::Client` builder fails to build.
    #[must_use]
    pub fn new(request_timeout: Duration) -> Self {
        let inner = reqwest::Client::builder()
            .build()
            .expect("failed to build reqwest client");
        Self {
            inner,
            request_timeout,
        }
    }
}

#[async_trait]
impl PredictTransport for HttpTransport {
    async fn post_image(
        &self,
        endpoint: Url,
        image: Bytes,
        filename: &str,
    ) -> PredictResult<Bytes> {
        let part = Part::bytes(image.to_vec())
            .file_name(filename.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| PredictError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("image", part);

        debug!(endpoint = %endpoint, bytes = image.len(), "posting image for inference");

        let resp = self
            .inner
            .post(endpoint.clone())
            .multipart(form)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(PredictError::from)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PredictError::HttpStatus {
                status: status.as_u16(),
                url: endpoint.to_string(),
            });
        }

        resp.bytes().await.map_err(PredictError::from)
    }
}
