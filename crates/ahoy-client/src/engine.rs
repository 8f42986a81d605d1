//! Tracking orchestrator. Confirms visits, submits events, retries
//! fire-and-forget events and publishes the current visit.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use ahoy_core::constants::{HEADER_VISIT, HEADER_VISITOR};
use ahoy_core::errors::TrackingError;
use ahoy_core::tracing::events;
use ahoy_core::{
    AhoyConfig, AhoyResult, Clock, Event, Headers, HttpRequest, Properties, TokenPair, TokenStore,
    Transport, Visit,
};
use ahoy_tokens::{TokenManager, TrackingContext};

use crate::protocol::{EventRequest, VisitRequest, VisitResponse};
use crate::request::{InterceptorChain, RequestBuilder, RequestInterceptor};
use crate::transport::validate;

/// Tracking state shared by every clone of a client.
struct Inner {
    config: AhoyConfig,
    requests: RequestBuilder,
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    interceptors: InterceptorChain,
    /// `None` until the first confirmed visit.
    current: watch::Sender<Option<Visit>>,
    /// Attached user id. Applied to the current visit and every later one.
    user_id: Mutex<Option<String>>,
}

/// The tracking client.
///
/// Cheap to clone; clones share tokens, interceptors and the current visit.
#[derive(Clone)]
pub struct Ahoy {
    inner: Arc<Inner>,
}

impl Ahoy {
    pub fn builder(config: AhoyConfig) -> AhoyBuilder {
        AhoyBuilder::new(config)
    }

    /// Client with the default token store, tracking context and transport.
    pub fn new(config: AhoyConfig) -> AhoyResult<Self> {
        AhoyBuilder::new(config).build()
    }

    pub fn config(&self) -> &AhoyConfig {
        &self.inner.config
    }

    /// Confirm a visit with the collector.
    ///
    /// Reads the current tokens (rotating an expired visit token), posts them
    /// with the application environment and `additional_params`, and checks
    /// that the collector echoes the same tokens back. On success the new
    /// visit replaces the current one and is published to subscribers; on
    /// any error the current visit is left as it was.
    ///
    /// Every call is a round-trip. Overlapping calls are not coordinated:
    /// whichever response is processed last becomes the current visit.
    /// Dropping the future before it completes leaves the current visit
    /// untouched.
    pub async fn track_visit(&self, additional_params: Option<Properties>) -> AhoyResult<Visit> {
        let inner = &self.inner;
        let tokens = inner.tokens.tokens()?;
        let candidate = Visit::new(tokens.clone(), additional_params);

        let body = VisitRequest::new(&candidate, &inner.config.environment);
        let request = inner.build(&inner.config.visits_path, &body, &tokens)?;
        let response = validate(inner.transport.submit(request).await?)?;

        let received: TokenPair = serde_json::from_slice::<VisitResponse>(&response.body)
            .map_err(|e| TrackingError::MalformedResponse {
                reason: e.to_string(),
            })?
            .into();
        if received != tokens {
            events::visit_rejected(&tokens.to_string(), &received.to_string());
            return Err(TrackingError::MismatchingVisit {
                expected: tokens,
                received,
            }
            .into());
        }

        let visit = {
            let user_id = inner.user_id.lock();
            let visit = candidate.with_user_id(user_id.clone());
            inner.current.send_replace(Some(visit.clone()));
            visit
        };
        events::visit_confirmed(
            visit.visitor_token(),
            visit.visit_token(),
            visit.additional_params().map_or(0, |p| p.len()),
        );
        Ok(visit)
    }

    /// Submit events against the current visit.
    ///
    /// Fails with `NoVisit`, without touching the network, when no visit has
    /// been confirmed. The response body is ignored once its status passes.
    pub async fn track(&self, events: Vec<Event>) -> AhoyResult<()> {
        let inner = &self.inner;
        let visit = self.current_visit().ok_or(TrackingError::NoVisit)?;

        let body = EventRequest::new(&visit, &events);
        let request = inner.build(&inner.config.events_path, &body, visit.tokens())?;
        validate(inner.transport.submit(request).await?)?;

        events::events_submitted(visit.visit_token(), events.len());
        Ok(())
    }

    /// Track one event now, in the background.
    ///
    /// The event is stamped with the current time and submitted on the
    /// ambient tokio runtime, retrying with exponential backoff up to
    /// `retry.max_retries` more times. Failures are logged and otherwise
    /// dropped. The returned handle only signals completion. Returns `None`
    /// when called outside a runtime.
    pub fn track_event(
        &self,
        name: impl Into<String>,
        properties: Properties,
    ) -> Option<JoinHandle<()>> {
        let event = Event::new(name, properties, self.inner.clock.now());
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(name = %event.name(), "no tokio runtime, event not tracked");
                return None;
            }
        };

        let client = self.clone();
        Some(runtime.spawn(async move { client.track_with_retry(event).await }))
    }

    async fn track_with_retry(&self, event: Event) {
        let retry = &self.inner.config.retry;
        let mut backoff = retry.initial_backoff();
        let mut last_err = String::new();

        for attempt in 0..=retry.max_retries {
            if attempt > 0 {
                events::retry_scheduled(
                    event.name(),
                    attempt,
                    retry.max_retries,
                    backoff.as_millis() as u64,
                    &last_err,
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(retry.max_backoff());
            }

            match self.track(vec![event.clone()]).await {
                Ok(()) => return,
                Err(e) => last_err = e.to_string(),
            }
        }

        events::event_dropped(event.name(), retry.max_retries + 1, &last_err);
    }

    /// Attach a user id to the current visit and to every visit confirmed
    /// later. Local only: no request is sent and subscribers are not notified.
    pub fn attach(&self, user_id: impl Into<String>) {
        self.set_user_id(Some(user_id.into()));
    }

    /// Remove the attached user id.
    pub fn detach(&self) {
        self.set_user_id(None);
    }

    fn set_user_id(&self, user_id: Option<String>) {
        let mut attached = self.inner.user_id.lock();
        *attached = user_id;
        self.inner.current.send_if_modified(|current| {
            if let Some(visit) = current {
                visit.set_user_id(attached.clone());
            }
            false
        });
    }

    /// Snapshot of the confirmed visit.
    pub fn current_visit(&self) -> Option<Visit> {
        self.inner.current.borrow().clone()
    }

    /// `Ahoy-Visitor` and `Ahoy-Visit` for the confirmed visit, for forwarding
    /// on the application's own requests. Empty before the first visit.
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        if let Some(visit) = self.inner.current.borrow().as_ref() {
            headers.set(HEADER_VISITOR, visit.visitor_token());
            headers.set(HEADER_VISIT, visit.visit_token());
        }
        headers
    }

    /// Observe visit confirmations. The receiver sees a new value only when a
    /// visit is confirmed.
    pub fn subscribe(&self) -> watch::Receiver<Option<Visit>> {
        self.inner.current.subscribe()
    }

    pub fn add_interceptor(&self, interceptor: impl RequestInterceptor + 'static) {
        self.inner.interceptors.push(Arc::new(interceptor));
    }

    pub fn set_interceptors(&self, interceptors: Vec<Arc<dyn RequestInterceptor>>) {
        self.inner.interceptors.replace(interceptors);
    }

    pub fn clear_interceptors(&self) {
        self.inner.interceptors.clear();
    }
}

impl Inner {
    fn build<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        tokens: &TokenPair,
    ) -> AhoyResult<HttpRequest> {
        self.requests
            .build(path, body, tokens, &self.interceptors.snapshot())
    }
}

impl fmt::Debug for Ahoy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ahoy")
            .field("base_url", &self.inner.config.base_url)
            .field("current_visit", &*self.inner.current.borrow())
            .field("interceptors", &self.inner.interceptors)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Ahoy`]. Everything but the config is optional.
pub struct AhoyBuilder {
    config: AhoyConfig,
    transport: Option<Arc<dyn Transport>>,
    token_store: Option<Arc<dyn TokenStore>>,
    context: Option<TrackingContext>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl AhoyBuilder {
    pub fn new(config: AhoyConfig) -> Self {
        Self {
            config,
            transport: None,
            token_store: None,
            context: None,
            interceptors: Vec::new(),
        }
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the default `TokenManager`.
    pub fn token_store(mut self, token_store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(token_store);
        self
    }

    /// Clock, ids, device id and store. Defaults to system providers over the
    /// store named by `config.storage`.
    pub fn context(mut self, context: TrackingContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> AhoyResult<Ahoy> {
        self.config.validate()?;

        let context = match self.context {
            Some(context) => context,
            None => TrackingContext::from_config(&self.config)?,
        };
        let tokens = match self.token_store {
            Some(tokens) => tokens,
            None => Arc::new(TokenManager::new(&context, self.config.visit_duration())),
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.config)?,
        };

        let (current, _) = watch::channel(None);
        Ok(Ahoy {
            inner: Arc::new(Inner {
                requests: RequestBuilder::from_config(&self.config),
                config: self.config,
                transport,
                tokens,
                clock: context.clock,
                interceptors: InterceptorChain::new(self.interceptors),
                current,
                user_id: Mutex::new(None),
            }),
        })
    }
}

impl fmt::Debug for AhoyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AhoyBuilder")
            .field("config", &self.config)
            .field("has_transport", &self.transport.is_some())
            .field("has_token_store", &self.token_store.is_some())
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http")]
fn default_transport(config: &AhoyConfig) -> AhoyResult<Arc<dyn Transport>> {
    Ok(Arc::new(crate::transport::ReqwestTransport::new(&config.http)?))
}

#[cfg(not(feature = "http"))]
fn default_transport(_config: &AhoyConfig) -> AhoyResult<Arc<dyn Transport>> {
    Err(ahoy_core::errors::TransportError::Unavailable {
        reason: "no transport configured and the `http` feature is disabled".into(),
    }
    .into())
}
