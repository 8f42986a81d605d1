//! Builds outbound collector requests.

use std::sync::Arc;

use serde::Serialize;

use ahoy_core::constants::{HEADER_CONTENT_TYPE, HEADER_VISIT, HEADER_VISITOR, JSON_CONTENT_TYPE};
use ahoy_core::{AhoyConfig, AhoyResult, Headers, HttpRequest, TokenPair};

use super::interceptor::RequestInterceptor;

/// Resolves collector URLs and assembles POST requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    ahoy_path: String,
}

impl RequestBuilder {
    pub fn new(base_url: impl Into<String>, ahoy_path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ahoy_path: ahoy_path.into(),
        }
    }

    pub fn from_config(config: &AhoyConfig) -> Self {
        Self::new(config.base_url.clone(), config.ahoy_path.clone())
    }

    /// `base_url/ahoy_path/path` with exactly one slash between segments.
    pub fn url(&self, path: &str) -> String {
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in [self.ahoy_path.as_str(), path] {
            let segment = segment.trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Build a POST of `body` to `path`.
    ///
    /// Interceptors run in order on the assembled request, then the content
    /// type and the two visit headers are set from `tokens`, overriding
    /// whatever an interceptor put there.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        tokens: &TokenPair,
        interceptors: &[Arc<dyn RequestInterceptor>],
    ) -> AhoyResult<HttpRequest> {
        let mut request = HttpRequest {
            method: "POST".to_string(),
            url: self.url(path),
            headers: Headers::new(),
            body: serde_json::to_vec(body)?,
        };

        for interceptor in interceptors {
            interceptor.intercept(&mut request);
        }

        request.headers.set(HEADER_CONTENT_TYPE, JSON_CONTENT_TYPE);
        request.headers.set(HEADER_VISITOR, tokens.visitor_token.as_str());
        request.headers.set(HEADER_VISIT, tokens.visit_token.as_str());

        Ok(request)
    }
}
