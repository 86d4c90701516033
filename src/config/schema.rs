//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Inbound HTTP listener.
    pub listener: ListenerConfig,

    /// Function backend the gateway invokes.
    pub backend: BackendConfig,

    /// Logging, access log and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port for inbound HTTP.
    pub port: u16,

    /// Largest request body accepted before answering 400.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8002,
            max_body_bytes: 6 * 1024 * 1024, // synchronous invoke payload cap
        }
    }
}

/// Function backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend address (e.g., "localhost:8001").
    pub address: String,

    /// Upper bound for a whole invocation in seconds.
    /// Unset means the call waits as long as the backend takes.
    pub invoke_timeout_secs: Option<u64>,

    /// Longest reply line accepted from the backend.
    pub max_frame_bytes: usize,
}

impl BackendConfig {
    pub fn invoke_timeout(&self) -> Option<Duration> {
        self.invoke_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            address: "localhost:8001".to_string(),
            invoke_timeout_secs: None,
            max_frame_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit one access log line per request.
    pub access_log: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            access_log: true,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
