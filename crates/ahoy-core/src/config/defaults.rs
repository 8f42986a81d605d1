// Single source of truth for all default values.

// --- Paths ---
pub const DEFAULT_AHOY_PATH: &str = "ahoy";
pub const DEFAULT_EVENTS_PATH: &str = "events";
pub const DEFAULT_VISITS_PATH: &str = "visits";

// --- Tokens ---
pub const DEFAULT_VISIT_DURATION_SECS: u64 = 1_800; // 30 minutes
pub const DEFAULT_DEVICE_ID_NAMESPACE: &str = "ahoy";

// --- Application ---
pub const DEFAULT_APP_VERSION: &str = "unknown";
pub const DEFAULT_OS_VERSION: &str = "unknown";

// --- Retry (fire-and-forget event tracking) ---
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 30_000;

// --- HTTP ---
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_GZIP: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "ahoy=info";
pub const LOG_ENV_VAR: &str = "AHOY_LOG";
