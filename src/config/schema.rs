//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the generator.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the generator.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Frontend listener (name, port, PROXY protocol).
    pub frontend: FrontendConfig,

    /// Backend section and explicit server list.
    pub backend: BackendConfig,

    /// Stats listener.
    pub stats: StatsConfig,

    /// Timeouts substituted into the base template.
    pub timeouts: TimeoutConfig,

    /// Syslog target substituted into the base template.
    pub logging: LoggingConfig,

    /// Discovery tuning (hosts filter, DNS port policy).
    pub discovery: DiscoveryConfig,

    /// Input and output file locations.
    pub paths: PathsConfig,

    /// Generator log settings.
    pub observability: ObservabilityConfig,
}

/// Frontend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FrontendConfig {
    /// Frontend identifier.
    pub name: String,

    /// Port the frontend binds on all interfaces.
    pub port: u16,

    /// Emit `accept-proxy` on the bind line.
    pub proxy_protocol: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            name: "http-frontend".to_string(),
            port: 5000,
            proxy_protocol: false,
        }
    }
}

/// Backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend identifier, also the frontend's `default_backend`.
    pub name: String,

    /// Balancing algorithm (e.g., "roundrobin", "leastconn").
    pub balance: String,

    /// Explicit `host[:port]` tokens used by the `env` and `dns` modes.
    pub servers: Vec<String>,

    /// Port used when a token or hosts entry carries none.
    pub default_port: u16,

    /// Append `cookie value` to every server line.
    pub cookies: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            name: "http-backend".to_string(),
            balance: "roundrobin".to_string(),
            servers: Vec::new(),
            default_port: 80,
            cookies: false,
        }
    }
}

/// Stats listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    pub port: u16,

    /// Basic auth credentials in `user:password` form.
    pub auth: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            port: 1936,
            auth: "admin:admin".to_string(),
        }
    }
}

/// Timeout configuration.
///
/// Values are kept verbatim because HAProxy accepts unit suffixes ("5s").
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect: String,
    pub client: String,
    pub server: String,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: "5000".to_string(),
            client: "50000".to_string(),
            server: "50000".to_string(),
        }
    }
}

/// Syslog target for the proxy runtime.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub target: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: "127.0.0.1".to_string(),
        }
    }
}

/// Which token's port a DNS-resolved address inherits.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DnsPortPolicy {
    /// Every resolved address uses the port of the last processed token.
    #[default]
    LastToken,
    /// Each resolved address uses the port of the token that produced it.
    Origin,
}

/// Discovery tuning.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Hosts-mode name filter, `;`-separated or whitespace-separated.
    pub service_names: String,

    pub dns_port_policy: DnsPortPolicy,
}

/// File locations.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Base template holding the global/defaults sections.
    pub base_template: PathBuf,

    /// Generated configuration document.
    pub output: PathBuf,

    /// Resolved address list written in DNS mode.
    pub dns_side_file: PathBuf,

    /// Host-alias table scanned in hosts mode.
    pub hosts_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_template: PathBuf::from("/tmp/haproxy.cfg"),
            output: PathBuf::from("/etc/haproxy/haproxy.cfg"),
            dns_side_file: PathBuf::from("/etc/haproxy/dns.backends"),
            hosts_file: PathBuf::from("/etc/hosts"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
