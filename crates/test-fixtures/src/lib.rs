//! Shared test doubles for the Ahoy workspace: a settable clock, scripted
//! id sources, and a transport that records requests and replays scripted
//! responses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;

use ahoy_core::errors::TransportError;
use ahoy_core::{
    AhoyConfig, ApplicationEnvironment, Clock, DeviceIdProvider, HttpRequest, HttpResponse,
    IdGenerator, Transport,
};

pub const VISITOR_UUID: &str = "EB4DCB73-2B32-52CD-A2CF-AD7948674B22";
pub const VISIT_UUID_1: &str = "B054681C-100B-46FE-94A0-7AACA78116CB";
pub const VISIT_UUID_2: &str = "4D02659F-6030-4C9A-B63F-9E322127C42B";
pub const VISIT_UUID_3: &str = "98C44594-050F-4DEF-80AF-AB723472469B";

/// Config used across client tests: one hour visits, custom paths.
pub fn test_config() -> AhoyConfig {
    let mut config = AhoyConfig::new(
        "https://ahoy.com",
        ApplicationEnvironment::new("iOS", "9.9.99", "16.0.2"),
    );
    config.ahoy_path = "test-ahoy".to_string();
    config.events_path = "my-events".to_string();
    config.visits_path = "my-visits".to_string();
    config.visit_duration_secs = Some(3_600);
    config.retry.initial_backoff_ms = 10;
    config.retry.max_backoff_ms = 100;
    config
}

// ─── Clock ─────────────────────────────────────────────────

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Clock starting at the unix epoch.
    pub fn epoch() -> Self {
        Self::new(epoch_plus(0))
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock() = at;
    }

    /// Jump to `secs` seconds after the epoch.
    pub fn set_secs(&self, secs: i64) {
        self.set(epoch_plus(secs));
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

pub fn epoch_plus(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .expect("timestamp in range")
}

// ─── Ids ───────────────────────────────────────────────────

/// Returns the same id until changed, and counts how often it was asked.
#[derive(Debug, Clone)]
pub struct ScriptedIds {
    next: Arc<Mutex<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedIds {
    pub fn fixed(id: impl Into<String>) -> Self {
        Self {
            next: Arc::new(Mutex::new(id.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set(&self, id: impl Into<String>) {
        *self.next.lock() = id.into();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdGenerator for ScriptedIds {
    fn generate(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next.lock().clone()
    }
}

/// Issues `prefix-1`, `prefix-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    counter: Arc<AtomicUsize>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{n}", self.prefix)
    }
}

/// Device id provider with a fixed answer.
#[derive(Debug, Clone)]
pub struct FixedDeviceId(pub Option<String>);

impl FixedDeviceId {
    pub fn some(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl DeviceIdProvider for FixedDeviceId {
    fn device_id(&self) -> Option<String> {
        self.0.clone()
    }
}

// ─── Transport ─────────────────────────────────────────────

/// Records every submitted request. Scripted responses are returned in FIFO
/// order; once the script is empty the request body is echoed back with 200,
/// which is what a well-behaved collector does for visit confirmation.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    script: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.script
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, error: TransportError) {
        self.script.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn clear(&self) {
        self.requests.lock().clear();
        self.script.lock().clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn submit(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let echo = request.body.clone();
        self.requests.lock().push(request);
        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| Ok(HttpResponse::new(200, echo)))
    }
}

/// Transport whose requests never complete. For cancellation tests.
#[derive(Debug, Clone, Default)]
pub struct PendingTransport {
    submitted: Arc<AtomicUsize>,
}

impl PendingTransport {
    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for PendingTransport {
    async fn submit(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.submitted.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}
