//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports non-zero, timeouts present)
//! - Reject malformed explicit backend tokens before discovery runs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GeneratorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::GeneratorConfig;
use crate::discovery::token::{HostPort, TokenError};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must not contain whitespace: `{value}`")]
    Whitespace { field: &'static str, value: String },

    #[error("{field} must be a non-zero port")]
    ZeroPort { field: &'static str },

    #[error("stats.auth must be in `user:password` form")]
    StatsAuth,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Validate a fully layered configuration.
pub fn validate_config(config: &GeneratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_name(&mut errors, "frontend.name", &config.frontend.name);
    check_name(&mut errors, "backend.name", &config.backend.name);
    // Algorithms may take arguments ("url_param userid", "uri depth 3").
    if config.backend.balance.trim().is_empty() {
        errors.push(ValidationError::Empty {
            field: "backend.balance",
        });
    }

    check_port(&mut errors, "frontend.port", config.frontend.port);
    check_port(&mut errors, "stats.port", config.stats.port);
    check_port(&mut errors, "backend.default_port", config.backend.default_port);

    match config.stats.auth.split_once(':') {
        Some((user, _)) if !user.is_empty() => {}
        _ => errors.push(ValidationError::StatsAuth),
    }

    for (field, value) in [
        ("timeouts.connect", &config.timeouts.connect),
        ("timeouts.client", &config.timeouts.client),
        ("timeouts.server", &config.timeouts.server),
        ("logging.target", &config.logging.target),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    for token in config.backend.servers.iter().filter(|t| !t.is_empty()) {
        if let Err(e) = HostPort::parse(token) {
            errors.push(e.into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::Empty { field });
    } else if value.chars().any(char::is_whitespace) {
        errors.push(ValidationError::Whitespace {
            field,
            value: value.to_string(),
        });
    }
}

fn check_port(errors: &mut Vec<ValidationError>, field: &'static str, port: u16) {
    if port == 0 {
        errors.push(ValidationError::ZeroPort { field });
    }
}
