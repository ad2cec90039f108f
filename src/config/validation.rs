//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream and client base URLs must be absolute http(s) URLs
//! - Bind addresses must parse as socket addresses
//! - Value ranges (body limit > 0, pacing intervals > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL {value:?} ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: must start with '/' and must not end with '/'")]
    InvalidPrefix { field: &'static str },

    #[error("{field}: not a valid header value")]
    InvalidHeader { field: &'static str },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    check_url(&mut errors, "upstream.api_base_url", &config.upstream.api_base_url);
    check_url(&mut errors, "upstream.static_base_url", &config.upstream.static_base_url);
    check_url(&mut errors, "client.base_url", &config.client.base_url);

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_header(&mut errors, "cors.allow_origin", &config.cors.allow_origin);
    check_header(&mut errors, "cors.allow_headers", &config.cors.allow_headers);
    check_header(&mut errors, "cors.allow_methods", &config.cors.allow_methods);

    let prefix = &config.functions.prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPrefix { field: "functions.prefix" });
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::Zero { field: "upstream.timeout_secs" });
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "security.max_body_size" });
    }
    if config.client.message_interval_ms == 0 {
        errors.push(ValidationError::Zero { field: "client.message_interval_ms" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_header(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if HeaderValue::from_str(value).is_err() {
        errors.push(ValidationError::InvalidHeader { field });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ProxyConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.api_base_url = "ftp://example.com/".into();
        config.upstream.static_base_url = "relative/path".into();
        config.functions.prefix = "functions/".into();
        config.security.max_body_size = 0;
        config.cors.allow_headers = "Content-Type\r\n".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::InvalidHeader { field: "cors.allow_headers" }));
        assert!(errors.contains(&ValidationError::Zero { field: "security.max_body_size" }));
        assert!(errors.contains(&ValidationError::InvalidPrefix { field: "functions.prefix" }));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ProxyConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
