//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::ValidationError;

/// Environment variable overriding the listener port.
pub const PORT_VAR: &str = "PORT";

/// Environment variable overriding the backend address.
pub const LAMBDA_HOST_VAR: &str = "LAMBDA_HOST";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text. Missing sections take their defaults.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Apply `PORT` and `LAMBDA_HOST` on top of `config`.
///
/// `lookup` abstracts the environment so callers can pass
/// `|key| std::env::var(key).ok()`. An unset, empty, unparsable or zero
/// `PORT` keeps the configured port; an empty `LAMBDA_HOST` keeps the
/// configured address.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(PORT_VAR).filter(|v| !v.is_empty()) {
        match raw.trim().parse::<u16>() {
            Ok(port) if port != 0 => config.listener.port = port,
            _ => tracing::warn!(
                value = %raw,
                port = config.listener.port,
                "Ignoring unusable PORT, keeping configured port"
            ),
        }
    }

    if let Some(host) = lookup(LAMBDA_HOST_VAR).filter(|v| !v.is_empty()) {
        config.backend.address = host;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ListenerConfig;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_cover_ports_and_backend() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.port, 8002);
        assert_eq!(config.backend.address, "localhost:8001");
        assert_eq!(config.backend.invoke_timeout_secs, None);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8002");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [backend]
            address = "fn.internal:9001"
            invoke_timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.address, "fn.internal:9001");
        assert_eq!(
            config.backend.invoke_timeout(),
            Some(std::time::Duration::from_secs(3))
        );
        assert_eq!(config.listener, ListenerConfig::default());
        assert!(config.observability.access_log);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let err = parse_config("[listener]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn env_overrides_port_and_host() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("PORT", "9000"), ("LAMBDA_HOST", "10.0.0.5:7000")]),
        );
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.backend.address, "10.0.0.5:7000");
    }

    #[test]
    fn unusable_env_values_keep_configuration() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "abc"), ("LAMBDA_HOST", "")]));
        assert_eq!(config.listener.port, 8002);
        assert_eq!(config.backend.address, "localhost:8001");

        apply_env_overrides(&mut config, env(&[("PORT", "0")]));
        assert_eq!(config.listener.port, 8002);
    }
}
