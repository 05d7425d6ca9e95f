use std::{env, path::PathBuf, time::Duration};

/// Default backend used when running against a local development stack.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Per-request deadline applied to every pipeline call unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// AppConfig
///
/// Holds the console client's configuration. Loaded once at startup and never mutated
/// afterwards; every component (pipeline, storage, router) receives a clone.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the admin backend, without a trailing slash.
    pub api_base: String,
    // Deadline for a single outbound request.
    pub request_timeout: Duration,
    // Location of the durable session file (credential + profile).
    pub storage_path: PathBuf,
    // Runtime environment marker. Selects the log format and fail-fast rules.
    pub env: Env,
}

/// Env
///
/// Runtime context. Production requires an explicit backend URL; local falls back to
/// the development stack.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// Safe, non-panicking values for test scaffolding.
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage_path: PathBuf::from(".petdimen-admin").join("session.json"),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from the environment.
    ///
    /// # Panics
    /// Panics in production when `ADMIN_API_BASE` is missing, so the client never
    /// silently talks to a development backend.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_base = match env {
            Env::Production => {
                env::var("ADMIN_API_BASE").expect("FATAL: ADMIN_API_BASE must be set in production.")
            }
            Env::Local => env::var("ADMIN_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        };

        let request_timeout = env::var("ADMIN_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let storage_path = env::var("ADMIN_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_storage_path());

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            request_timeout,
            storage_path,
            env,
        }
    }
}

/// Per-user data directory, or a dot-directory next to the working directory when the
/// platform does not expose one.
fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("petdimen-admin")
        .join("session.json")
}
