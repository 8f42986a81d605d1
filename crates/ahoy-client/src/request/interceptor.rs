//! Request interceptors: caller hooks run on every outbound request.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use ahoy_core::{Headers, HttpRequest};

/// Mutates a request before it is sent. Interceptors run in registration
/// order and may add or overwrite any header, but `Content-Type`,
/// `Ahoy-Visitor` and `Ahoy-Visit` are reset after the chain runs.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: &mut HttpRequest);
}

impl<F> RequestInterceptor for F
where
    F: Fn(&mut HttpRequest) + Send + Sync,
{
    fn intercept(&self, request: &mut HttpRequest) {
        self(request)
    }
}

/// Sets a fixed list of headers on every request.
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    headers: Headers,
}

impl StaticHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// `Authorization: Bearer <token>`.
    pub fn bearer(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }
}

impl RequestInterceptor for StaticHeaders {
    fn intercept(&self, request: &mut HttpRequest) {
        for (name, value) in self.headers.iter() {
            request.headers.set(name, value);
        }
    }
}

/// Ordered interceptor list, replaceable while the client is in use.
#[derive(Default)]
pub struct InterceptorChain {
    interceptors: RwLock<Vec<Arc<dyn RequestInterceptor>>>,
}

impl InterceptorChain {
    pub fn new(interceptors: Vec<Arc<dyn RequestInterceptor>>) -> Self {
        Self {
            interceptors: RwLock::new(interceptors),
        }
    }

    pub fn push(&self, interceptor: Arc<dyn RequestInterceptor>) {
        self.interceptors.write().push(interceptor);
    }

    pub fn replace(&self, interceptors: Vec<Arc<dyn RequestInterceptor>>) {
        *self.interceptors.write() = interceptors;
    }

    pub fn clear(&self) {
        self.interceptors.write().clear();
    }

    pub fn len(&self) -> usize {
        self.interceptors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.read().is_empty()
    }

    /// Current list. Requests already being built keep the list they started with.
    pub fn snapshot(&self) -> Vec<Arc<dyn RequestInterceptor>> {
        self.interceptors.read().clone()
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.len())
            .finish()
    }
}
