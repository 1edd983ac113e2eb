//! Shared fixtures for integration and property tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use haproxy_confgen::config::GeneratorConfig;
use haproxy_confgen::discovery::LookupOutcome;
use haproxy_confgen::HostLookup;
use tempfile::TempDir;

pub const BASE_TEMPLATE: &str = "global
  log $LOGGING local0

defaults
  mode http
  timeout connect $TIMEOUT_CONNECT
  timeout client $TIMEOUT_CLIENT
  timeout server $TIMEOUT_SERVER
";

/// In-memory resolver: unknown hosts fail.
#[derive(Debug, Default)]
pub struct FakeDns {
    records: HashMap<String, Vec<IpAddr>>,
}

impl FakeDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.records.insert(host.to_string(), ips);
        self
    }
}

impl HostLookup for FakeDns {
    fn lookup(&self, host: &str) -> LookupOutcome {
        match self.records.get(host) {
            Some(ips) => LookupOutcome::Resolved(ips.clone()),
            None => LookupOutcome::Failed(format!("The DNS query name does not exist: {}.", host)),
        }
    }
}

/// A temp directory holding the base template, with paths pointed into it.
pub struct Fixture {
    pub dir: TempDir,
    pub config: GeneratorConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.cfg"), BASE_TEMPLATE).unwrap();

        let mut config = GeneratorConfig::default();
        config.paths.base_template = dir.path().join("base.cfg");
        config.paths.output = dir.path().join("haproxy.cfg");
        config.paths.dns_side_file = dir.path().join("dns.backends");
        config.paths.hosts_file = dir.path().join("hosts");

        Self { dir, config }
    }

    pub fn with_servers(mut self, servers: &[&str]) -> Self {
        self.config.backend.servers = servers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn write_hosts(&self, content: &str) {
        fs::write(&self.config.paths.hosts_file, content).unwrap();
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.paths.output.clone()
    }

    pub fn read_output(&self) -> String {
        fs::read_to_string(&self.config.paths.output).unwrap()
    }

    pub fn read_side_file(&self) -> Option<String> {
        fs::read_to_string(&self.config.paths.dns_side_file).ok()
    }
}

/// `server` lines of a document, without indentation.
pub fn server_lines(document: &str) -> Vec<String> {
    document
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("server "))
        .map(str::to_string)
        .collect()
}
