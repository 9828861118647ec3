//! Server configuration.

use std::env;
use std::path::PathBuf;

/// Server configuration, environment-driven with sensible defaults.
pub struct Config {
    /// HTTP bind address.
    pub bind_addr: String,

    /// Number of workers pulling from the dispatch queue.
    pub workers: usize,

    /// Directory the developer agent writes artifacts into.
    pub output_dir: PathBuf,

    /// Path of the append-only audit log.
    pub audit_log_path: PathBuf,

    /// API key for the generation backend. Absent means degraded mode:
    /// deterministic routing and placeholder/stub results.
    pub openai_api_key: Option<String>,

    /// Model used by the routing classifier.
    pub router_model: String,

    /// Model used by the agents.
    pub worker_model: String,

    /// Override for the generation backend base URL.
    pub openai_base_url: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("RELAY_BIND_ADDR").unwrap_or(defaults.bind_addr),
            workers: env::var("RELAY_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.workers),
            output_dir: env::var("RELAY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            audit_log_path: env::var("RELAY_AUDIT_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.audit_log_path),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            router_model: env::var("OPENAI_MODEL_ROUTER").unwrap_or(defaults.router_model),
            worker_model: env::var("OPENAI_MODEL_WORKER").unwrap_or(defaults.worker_model),
            openai_base_url: env::var("OPENAI_BASE_URL").ok().filter(|u| !u.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            workers: 4,
            output_dir: PathBuf::from("outputs"),
            audit_log_path: PathBuf::from("audit-log.jsonl"),
            openai_api_key: None,
            router_model: "gpt-4o-mini".to_string(),
            worker_model: "gpt-4o-mini".to_string(),
            openai_base_url: None,
        }
    }
}
