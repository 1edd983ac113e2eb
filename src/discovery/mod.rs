//! Backend discovery subsystem.
//!
//! # Data Flow
//! ```text
//! CLI mode argument → DiscoveryMode
//!     → Apply discovery strategy:
//!         - explicit.rs (configured host[:port] list, as given)
//!         - dns.rs (resolve each host, collapse addresses, fall back to literal)
//!         - hosts.rs (scan the host-alias table, dedup by IP, filter by name)
//!     → Discovered { ordered BackendSpecs, DNS address set }
//!     → assemble
//! ```
//!
//! # Design Decisions
//! - One discovery pass per invocation; nothing is cached or retried
//! - Per-entry failures are values (`LookupOutcome::Failed`), never errors
//! - Output order is deterministic for identical inputs

pub mod dns;
pub mod explicit;
pub mod hosts;
pub mod token;

use std::fmt;
use std::str::FromStr;

use crate::config::GeneratorConfig;

pub use dns::{DnsLookup, HostLookup, LookupOutcome, ResolvedAddress, ResolvedSet, SystemResolver};
pub use explicit::ExplicitList;
pub use hosts::HostsFileScan;
pub use token::{HostPort, TokenError};

/// Discovery strategy selected by the first CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// `dns`: resolve the configured hosts.
    Dns,
    /// `env`: use the configured hosts verbatim.
    Explicit,
    /// `hosts`: scan the host-alias table.
    HostsFile,
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns" => Ok(Self::Dns),
            "env" => Ok(Self::Explicit),
            "hosts" => Ok(Self::HostsFile),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dns => "dns",
            Self::Explicit => "env",
            Self::HostsFile => "hosts",
        })
    }
}

/// Suffix that makes a server name unique within the backend section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerIndex {
    /// Position-based counter (explicit list, DNS fallback, hosts scan).
    Position(usize),
    /// Derived from a resolved address, dots replaced by dashes.
    Address(String),
}

impl fmt::Display for ServerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(i) => write!(f, "{}", i),
            Self::Address(a) => f.write_str(a),
        }
    }
}

/// One backend server to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSpec {
    /// Name prefix of the server line.
    pub name: String,
    /// Address the proxy connects to.
    pub host: String,
    pub port: u16,
    pub index: ServerIndex,
}

impl BackendSpec {
    /// Spec whose name is derived from `host` with dots replaced by dashes.
    pub fn for_host(host: &str, port: u16, index: ServerIndex) -> Self {
        Self {
            name: dashed(host),
            host: host.to_string(),
            port,
            index,
        }
    }

    /// Unique server name: `<name>-<index>`.
    pub fn server_name(&self) -> String {
        format!("{}-{}", self.name, self.index)
    }
}

/// Replace every `.` with `-`.
pub fn dashed(s: &str) -> String {
    s.replace('.', "-")
}

/// Result of one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Backends in render order.
    pub backends: Vec<BackendSpec>,
    /// Successfully resolved addresses (DNS mode only).
    pub resolved: Option<ResolvedSet>,
}

/// A discovery strategy.
pub trait BackendSource {
    /// Run one discovery pass.
    fn discover(&self) -> Discovered;
}

/// Run the strategy for `mode` against `config`.
///
/// `lookup` is only consulted in DNS mode. Tokens are assumed to have passed
/// config validation; a malformed token still surfaces as an error here.
pub fn resolve<L: HostLookup>(
    mode: DiscoveryMode,
    config: &GeneratorConfig,
    lookup: &L,
) -> Result<Discovered, TokenError> {
    let tokens = token::parse_tokens(&config.backend.servers)?;
    let default_port = config.backend.default_port;

    let discovered = match mode {
        DiscoveryMode::Explicit => ExplicitList::new(tokens, default_port).discover(),
        DiscoveryMode::Dns => DnsLookup::new(
            tokens,
            default_port,
            config.discovery.dns_port_policy,
            lookup,
        )
        .discover(),
        DiscoveryMode::HostsFile => HostsFileScan::new(
            &config.paths.hosts_file,
            hosts::parse_service_names(&config.discovery.service_names),
            default_port,
            hosts::local_address(),
        )
        .discover(),
    };

    tracing::info!(
        mode = %mode,
        count = discovered.backends.len(),
        "Backend discovery finished"
    );

    Ok(discovered)
}
