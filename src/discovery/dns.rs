//! DNS discovery strategy.
//!
//! # Responsibilities
//! - Resolve every configured host to its A records, one host at a time
//! - Collapse addresses shared by several hosts (last writer owns the origin)
//! - Fall back to a literal server entry when a host does not resolve
//! - Expose the resolved set for the side file

use std::collections::HashMap;
use std::net::IpAddr;

use hickory_resolver::Resolver;

use crate::config::DnsPortPolicy;
use crate::discovery::token::HostPort;
use crate::discovery::{dashed, BackendSource, BackendSpec, Discovered, ServerIndex};

/// Per-host resolution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved(Vec<IpAddr>),
    Failed(String),
}

/// Name resolution seam, so discovery can run against a fake resolver.
pub trait HostLookup {
    fn lookup(&self, host: &str) -> LookupOutcome;
}

impl<L: HostLookup> HostLookup for Option<L> {
    fn lookup(&self, host: &str) -> LookupOutcome {
        match self {
            Some(inner) => inner.lookup(host),
            None => LookupOutcome::Failed("no resolver configured".to_string()),
        }
    }
}

/// Blocking resolver configured from the system's resolv.conf.
pub struct SystemResolver {
    resolver: Result<Resolver, String>,
}

impl SystemResolver {
    /// Build from system configuration.
    ///
    /// A broken resolver setup is not fatal: every lookup then fails and the
    /// hosts fall back to literal entries.
    pub fn from_system_conf() -> Self {
        let resolver = Resolver::from_system_conf().map_err(|e| {
            tracing::error!(error = %e, "Failed to load system resolver configuration");
            e.to_string()
        });
        Self { resolver }
    }
}

impl HostLookup for SystemResolver {
    fn lookup(&self, host: &str) -> LookupOutcome {
        let resolver = match &self.resolver {
            Ok(resolver) => resolver,
            Err(e) => return LookupOutcome::Failed(e.clone()),
        };

        match resolver.ipv4_lookup(host) {
            Ok(records) => LookupOutcome::Resolved(records.iter().map(|a| IpAddr::V4(a.0)).collect()),
            Err(e) => LookupOutcome::Failed(e.to_string()),
        }
    }
}

/// A resolved address and the token that last produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    pub ip: String,
    pub originating_host: String,
    /// Port of the originating token.
    pub port: u16,
}

/// Addresses keyed by IP, kept in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSet {
    entries: Vec<ResolvedAddress>,
    positions: HashMap<String, usize>,
}

impl ResolvedSet {
    /// Insert or overwrite the origin of `ip`.
    pub fn insert(&mut self, ip: String, originating_host: &str, port: u16) {
        match self.positions.get(&ip) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.originating_host = originating_host.to_string();
                entry.port = port;
            }
            None => {
                self.positions.insert(ip.clone(), self.entries.len());
                self.entries.push(ResolvedAddress {
                    ip,
                    originating_host: originating_host.to_string(),
                    port,
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAddress> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Addresses in lexicographic (string) order.
    pub fn sorted_ips(&self) -> Vec<&str> {
        let mut ips: Vec<&str> = self.entries.iter().map(|e| e.ip.as_str()).collect();
        ips.sort_unstable();
        ips
    }

    /// Side file content: sorted addresses joined by single spaces.
    pub fn side_file_line(&self) -> String {
        self.sorted_ips().join(" ")
    }
}

/// Resolves the configured tokens through a [`HostLookup`].
pub struct DnsLookup<'a, L: HostLookup> {
    tokens: Vec<HostPort>,
    default_port: u16,
    port_policy: DnsPortPolicy,
    lookup: &'a L,
}

impl<'a, L: HostLookup> DnsLookup<'a, L> {
    pub fn new(
        tokens: Vec<HostPort>,
        default_port: u16,
        port_policy: DnsPortPolicy,
        lookup: &'a L,
    ) -> Self {
        Self {
            tokens,
            default_port,
            port_policy,
            lookup,
        }
    }
}

impl<L: HostLookup> BackendSource for DnsLookup<'_, L> {
    fn discover(&self) -> Discovered {
        let mut backends = Vec::new();
        let mut resolved = ResolvedSet::default();
        let mut last_port = self.default_port;

        for (i, token) in self.tokens.iter().enumerate() {
            let port = token.port_or(self.default_port);
            last_port = port;

            let reason = match self.lookup.lookup(&token.host) {
                LookupOutcome::Resolved(addrs) if !addrs.is_empty() => {
                    tracing::debug!(host = %token.host, count = addrs.len(), "Host resolved");
                    for ip in addrs {
                        resolved.insert(ip.to_string(), &token.host, port);
                    }
                    continue;
                }
                LookupOutcome::Resolved(_) => "no A records".to_string(),
                LookupOutcome::Failed(reason) => reason,
            };

            tracing::warn!(
                host = %token.host,
                error = %reason,
                "DNS lookup failed, using host literally"
            );
            backends.push(BackendSpec::for_host(&token.host, port, ServerIndex::Position(i)));
        }

        for entry in resolved.iter() {
            let port = match self.port_policy {
                DnsPortPolicy::LastToken => last_port,
                DnsPortPolicy::Origin => entry.port,
            };
            backends.push(BackendSpec {
                name: dashed(&entry.originating_host),
                host: entry.ip.clone(),
                port,
                index: ServerIndex::Address(dashed(&entry.ip)),
            });
        }

        Discovered {
            backends,
            resolved: Some(resolved),
        }
    }
}
