//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde/clap handle syntactic)
//! - Check the upstream host parses as an authority
//! - Validate value ranges (cap > 0, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs once at startup before any socket is opened

use axum::http::uri::Authority;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    /// Upstream host is empty or not a valid authority.
    InvalidServerHost(String),
    /// Outbound connection cap must be at least one.
    ZeroConnectionCap,
    /// A timeout was configured as zero seconds.
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidServerHost(host) => {
                write!(f, "invalid server host {:?}", host)
            }
            ValidationError::ZeroConnectionCap => {
                write!(f, "max_in_flight must be at least 1")
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "{} must be greater than 0", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.upstream.server_host.trim();
    if host.is_empty() || host.parse::<Authority>().is_err() || host.contains('/') {
        errors.push(ValidationError::InvalidServerHost(
            config.upstream.server_host.clone(),
        ));
    }

    if config.upstream.max_in_flight == 0 {
        errors.push(ValidationError::ZeroConnectionCap);
    }

    if config.timeouts.dial_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("dial_secs"));
    }
    if config.timeouts.keep_alive_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("keep_alive_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn empty_server_host_is_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.server_host = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::InvalidServerHost(_)]
        ));
    }

    #[test]
    fn server_host_with_path_is_rejected() {
        let mut config = ProxyConfig::default();
        config.upstream.server_host = "example.com/api".to_string();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn host_with_port_is_accepted() {
        let mut config = ProxyConfig::default();
        config.upstream.server_host = "example.com:8443".to_string();

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = ProxyConfig::default();
        config.upstream.server_host = String::new();
        config.upstream.max_in_flight = 0;
        config.timeouts.dial_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
