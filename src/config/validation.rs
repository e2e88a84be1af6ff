//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the allowed origin is a bare origin that browsers can send
//! - Validate path prefixes, header names, and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use axum::http::HeaderName;
use thiserror::Error;
use url::Url;

use crate::config::schema::GateConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.allowed_origin {0:?} is not a valid URL")]
    OriginUnparsable(String),

    #[error("site.allowed_origin {0:?} must use http or https")]
    OriginScheme(String),

    #[error("site.allowed_origin {given:?} is not a bare origin (expected {expected:?})")]
    OriginNotBare { given: String, expected: String },

    #[error("site.index_file must not be empty")]
    EmptyIndexFile,

    #[error("{field} {value:?} must start with '/'")]
    RelativePath { field: &'static str, value: String },

    #[error("bot.blocked_agents[{0}] is empty")]
    EmptyBotToken(usize),

    #[error("access.bypass_param must not be empty")]
    EmptyBypassParam,

    #[error("loader.allowed_timezones must not be empty")]
    NoTimezones,

    #[error("loader.timezone_header {0:?} is not a valid header name")]
    InvalidHeaderName(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_origin(&config.site.allowed_origin) {
        errors.push(e);
    }

    if config.site.index_file.trim().is_empty() {
        errors.push(ValidationError::EmptyIndexFile);
    }

    for prefix in &config.access.exempt_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field: "access.exempt_prefixes",
                value: prefix.clone(),
            });
        }
    }

    if !config.loader.path.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            field: "loader.path",
            value: config.loader.path.clone(),
        });
    }

    for (i, token) in config.bot.blocked_agents.iter().enumerate() {
        if token.is_empty() {
            errors.push(ValidationError::EmptyBotToken(i));
        }
    }

    if config.access.bypass_param.is_empty() {
        errors.push(ValidationError::EmptyBypassParam);
    }

    if config.loader.allowed_timezones.is_empty() {
        errors.push(ValidationError::NoTimezones);
    }

    if HeaderName::from_bytes(config.loader.timezone_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(
            config.loader.timezone_header.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The origin is compared byte-for-byte against the `Origin` header, so it
/// must already be in the form a browser serializes.
fn validate_origin(origin: &str) -> Result<(), ValidationError> {
    let url = Url::parse(origin).map_err(|_| ValidationError::OriginUnparsable(origin.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::OriginScheme(origin.to_string()));
    }

    let expected = url.origin().ascii_serialization();
    if expected != origin {
        return Err(ValidationError::OriginNotBare {
            given: origin.to_string(),
            expected,
        });
    }

    Ok(())
}
