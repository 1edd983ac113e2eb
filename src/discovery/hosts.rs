//! Host-alias table (`/etc/hosts`) discovery strategy.
//!
//! # Responsibilities
//! - Skip loopback, wildcard, IPv6 and the machine's own address
//! - Dedup by IP (first surviving line wins)
//! - Keep only names matching the service filter, when one is given
//!
//! # Design Decisions
//! - An unreadable table means "no backends", not a failure
//! - Exclusion checks are substring matches over the whole line

use std::collections::HashSet;
use std::fs;
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};

use crate::discovery::{BackendSource, BackendSpec, Discovered, ServerIndex};

/// Fixed server name prefix for hosts-file backends.
pub const SERVER_NAME: &str = "http-server";

/// Substrings that disqualify a line.
const EXCLUDED: [&str; 3] = ["0.0.0.0", "127.0.0.1", "::"];

/// Split the service-name filter.
///
/// Legacy compatibility: a value containing `;` is split on `;` (empty
/// pieces kept, and an empty piece matches every name); anything else is
/// split on whitespace.
pub fn parse_service_names(raw: &str) -> Vec<String> {
    if raw.contains(';') {
        raw.split(';').map(str::to_string).collect()
    } else {
        raw.split_whitespace().map(str::to_string).collect()
    }
}

/// This machine's IPv4 address, used to skip its own hosts entry.
///
/// The hostname comes from `/proc/sys/kernel/hostname` or `/etc/hostname`,
/// so this is Linux/container specific; elsewhere it returns `None` and the
/// own-address exclusion is skipped. The name is resolved with `getaddrinfo`.
pub fn local_address() -> Option<String> {
    let hostname = ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .find_map(|p| fs::read_to_string(p).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    match (hostname.as_str(), 0).to_socket_addrs() {
        Ok(addrs) => addrs
            .filter(|a| a.is_ipv4())
            .map(|a| a.ip().to_string())
            .next(),
        Err(e) => {
            tracing::warn!(host = %hostname, error = %e, "Could not resolve local hostname");
            None
        }
    }
}

/// Scans a host-alias table for backends.
#[derive(Debug, Clone)]
pub struct HostsFileScan {
    path: PathBuf,
    filters: Vec<String>,
    default_port: u16,
    local_addr: Option<String>,
}

impl HostsFileScan {
    pub fn new(
        path: &Path,
        filters: Vec<String>,
        default_port: u16,
        local_addr: Option<String>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            filters,
            default_port,
            local_addr,
        }
    }

    /// Apply the scan rules to table content.
    pub fn scan(&self, content: &str) -> Vec<BackendSpec> {
        let mut seen = HashSet::new();
        let mut backends = Vec::new();

        for line in content.lines() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };

            if self.is_excluded(line) {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (ip, name) = match (fields.next(), fields.next()) {
                (Some(ip), Some(name)) => (ip, name),
                _ => continue,
            };

            if seen.contains(ip) {
                continue;
            }
            if !self.filters.is_empty() && !self.filters.iter().any(|f| name.contains(f.as_str())) {
                continue;
            }

            seen.insert(ip.to_string());
            backends.push(BackendSpec {
                name: SERVER_NAME.to_string(),
                host: ip.to_string(),
                port: self.default_port,
                index: ServerIndex::Position(backends.len() + 1),
            });
        }

        backends
    }

    fn is_excluded(&self, line: &str) -> bool {
        EXCLUDED.iter().any(|pat| line.contains(pat))
            || self
                .local_addr
                .as_deref()
                .is_some_and(|local| !local.is_empty() && line.contains(local))
    }
}

impl BackendSource for HostsFileScan {
    fn discover(&self) -> Discovered {
        let backends = match fs::read_to_string(&self.path) {
            Ok(content) => self.scan(&content),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Host-alias table unavailable, no backends configured"
                );
                Vec::new()
            }
        };

        Discovered {
            backends,
            resolved: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
127.0.0.1\tlocalhost
::1\tlocalhost ip6-localhost
# 10.9.9.9 commented-out
10.0.0.5\tapi-prod
10.0.0.6\tweb-prod
10.0.0.5\tapi-prod-alias
172.17.0.3\tself-container
lonely
0.0.0.0 blackhole
";

    fn scan(filters: &str, local: Option<&str>) -> Vec<String> {
        HostsFileScan::new(
            Path::new("/unused"),
            parse_service_names(filters),
            80,
            local.map(str::to_string),
        )
        .scan(TABLE)
        .iter()
        .map(|b| format!("{} {}:{}", b.server_name(), b.host, b.port))
        .collect()
    }

    #[test]
    fn test_no_filter() {
        assert_eq!(
            scan("", Some("172.17.0.3")),
            vec!["http-server-1 10.0.0.5:80", "http-server-2 10.0.0.6:80"]
        );
    }

    #[test]
    fn test_local_address_unknown() {
        assert_eq!(scan("", None).len(), 3);
    }

    #[test]
    fn test_filter_counts_only_survivors() {
        assert_eq!(scan("web", None), vec!["http-server-1 10.0.0.6:80"]);
        assert_eq!(scan("api", None), vec!["http-server-1 10.0.0.5:80"]);
    }

    #[test]
    fn test_filtered_line_does_not_claim_ip() {
        let content = "10.0.0.7 web-a\n10.0.0.7 api-a\n";
        let found = HostsFileScan::new(Path::new("/unused"), vec!["api".into()], 80, None)
            .scan(content);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].host, "10.0.0.7");
    }

    #[test]
    fn test_service_name_formats() {
        assert_eq!(parse_service_names("api;web"), vec!["api", "web"]);
        assert_eq!(parse_service_names("api web\tdb"), vec!["api", "web", "db"]);
        assert!(parse_service_names("").is_empty());
        assert_eq!(parse_service_names("api;"), vec!["api", ""]);
    }

    #[test]
    fn test_trailing_semicolon_matches_everything() {
        assert_eq!(scan("nomatch;", None).len(), 3);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = HostsFileScan::new(&dir.path().join("hosts"), Vec::new(), 80, None).discover();
        assert!(found.backends.is_empty());
        assert!(found.resolved.is_none());
    }
}
