//! HTTP transport over async reqwest, with timeout and gzip.

use std::time::Duration;

use async_trait::async_trait;

use ahoy_core::config::HttpConfig;
use ahoy_core::errors::TransportError;
use ahoy_core::{HttpRequest, HttpResponse, Transport};

/// Convert a string into a TransportError::NetworkError.
fn net_err(reason: String) -> TransportError {
    TransportError::NetworkError { reason }
}

/// Default transport. Sends the request as built and returns whatever status
/// comes back; status validation happens in the client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(config.gzip)
            .build()
            .map_err(|e| TransportError::ClientBuild {
                reason: e.to_string(),
            })?;
        Ok(Self { client, timeout })
    }

    /// Wrap an existing client, e.g. one with a proxy or custom TLS setup.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn map_err(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            net_err(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn submit(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| net_err(format!("invalid method {}: {e}", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        tracing::trace!(url = %request.url, bytes = request.body.len(), "sending request");
        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_err(e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_err(e))?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
