//! Environment variable overrides.
//!
//! The container image historically configured the generator purely through
//! environment variables. Those names are still honoured and take precedence
//! over the config file.

use crate::config::loader::ConfigError;
use crate::config::schema::GeneratorConfig;

/// Apply legacy environment overrides using `lookup` to read variables.
///
/// `lookup` is normally `|k| std::env::var(k).ok()`; tests pass a map.
pub fn apply_env_overrides<F>(config: &mut GeneratorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("FRONTEND_NAME") {
        config.frontend.name = v;
    }
    if let Some(v) = lookup("FRONTEND_PORT") {
        config.frontend.port = parse_port("FRONTEND_PORT", &v)?;
    }
    if let Some(v) = lookup("PROXY_PROTOCOL_ENABLED") {
        config.frontend.proxy_protocol = parse_flag(&v);
    }

    if let Some(v) = lookup("BACKEND_NAME") {
        config.backend.name = v;
    }
    if let Some(v) = lookup("BALANCE") {
        config.backend.balance = v;
    }
    if let Some(v) = lookup("BACKENDS") {
        config.backend.servers = v.split_whitespace().map(str::to_string).collect();
    }
    if let Some(v) = lookup("BACKENDS_PORT") {
        config.backend.default_port = parse_port("BACKENDS_PORT", &v)?;
    }
    if let Some(v) = lookup("COOKIES_ENABLED") {
        config.backend.cookies = parse_flag(&v);
    }

    if let Some(v) = lookup("STATS_PORT") {
        config.stats.port = parse_port("STATS_PORT", &v)?;
    }
    if let Some(v) = lookup("STATS_AUTH") {
        config.stats.auth = v;
    }

    if let Some(v) = lookup("TIMEOUT_CONNECT") {
        config.timeouts.connect = v;
    }
    if let Some(v) = lookup("TIMEOUT_CLIENT") {
        config.timeouts.client = v;
    }
    if let Some(v) = lookup("TIMEOUT_SERVER") {
        config.timeouts.server = v;
    }

    if let Some(v) = lookup("LOGGING") {
        config.logging.target = v;
    }
    if let Some(v) = lookup("SERVICE_NAMES") {
        config.discovery.service_names = v;
    }

    Ok(())
}

/// Only a case-insensitive `true` enables a flag.
fn parse_flag(value: &str) -> bool {
    value.to_lowercase() == "true"
}

fn parse_port(var: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        var,
        value: value.to_string(),
    })
}
