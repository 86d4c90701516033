//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.port must not be 0")]
    ZeroPort,
    #[error("listener.max_body_bytes must be greater than 0")]
    ZeroBodyLimit,
    #[error("backend.address {0:?} is not host:port")]
    BackendAddress(String),
    #[error("backend.invoke_timeout_secs must be greater than 0")]
    ZeroTimeout,
    #[error("backend.max_frame_bytes must be greater than 0")]
    ZeroFrameLimit,
    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check every semantic constraint and report all violations.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if !is_host_port(&config.backend.address) {
        errors.push(ValidationError::BackendAddress(
            config.backend.address.clone(),
        ));
    }
    if config.backend.invoke_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.backend.max_frame_bytes == 0 {
        errors.push(ValidationError::ZeroFrameLimit);
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
