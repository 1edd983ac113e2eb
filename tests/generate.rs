//! End-to-end generation tests: config in, files out.

use std::fs;

use haproxy_confgen::discovery::hosts::local_address;
use haproxy_confgen::render::TemplateError;
use haproxy_confgen::{generate, run, DiscoveryMode, DocumentSink, GenerateError};

mod common;
use common::{server_lines, FakeDns, Fixture};

fn run_to_file(fixture: &Fixture, mode: Option<DiscoveryMode>, dns: &FakeDns) {
    run(mode, &fixture.config, dns, &DocumentSink::File(fixture.output_path())).unwrap();
}

#[test]
fn test_explicit_list_scenario() {
    let fixture = Fixture::new().with_servers(&["10.0.0.1:8080", "10.0.0.2"]);
    run_to_file(&fixture, Some(DiscoveryMode::Explicit), &FakeDns::new());

    let doc = fixture.read_output();
    assert_eq!(
        server_lines(&doc),
        vec![
            "server 10-0-0-1-0 10.0.0.1:8080  check",
            "server 10-0-0-2-1 10.0.0.2:80  check",
        ]
    );
    assert!(doc.starts_with("global\n  log 127.0.0.1 local0\n"));
    assert!(doc.contains("timeout client 50000\n"));
    assert!(doc.ends_with("\nlisten default\n  bind *:4242\n"));
    assert_eq!(fixture.read_side_file(), None);
}

#[test]
fn test_section_order() {
    let fixture = Fixture::new().with_servers(&["a"]);
    let doc = generate(Some(DiscoveryMode::Explicit), &fixture.config, &FakeDns::new())
        .unwrap()
        .document;

    let positions: Vec<usize> = [
        "timeout server",
        "listen stats",
        "frontend http-frontend",
        "backend http-backend",
        "server a-0 a:80",
        "listen default",
    ]
    .iter()
    .map(|needle| doc.find(needle).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn test_hosts_filter_scenario() {
    let mut fixture = Fixture::new();
    fixture.config.discovery.service_names = "api".into();
    fixture.write_hosts("10.0.0.5 api-prod\n10.0.0.6 web-prod\n");
    run_to_file(&fixture, Some(DiscoveryMode::HostsFile), &FakeDns::new());

    assert_eq!(
        server_lines(&fixture.read_output()),
        vec!["server http-server-1 10.0.0.5:80  check"]
    );
}

#[test]
fn test_hosts_dedup_and_exclusions() {
    let fixture = Fixture::new();
    let own_line = local_address()
        .map(|local| format!("{local} this-container\n"))
        .unwrap_or_default();
    fixture.write_hosts(&format!(
        "127.0.0.1 localhost\n::1 localhost ip6-localhost\nfe00::0 ip6-localnet\n\
         {own_line}10.0.0.5 api\n10.0.0.5 api-again\n10.0.0.6 web\n"
    ));
    run_to_file(&fixture, Some(DiscoveryMode::HostsFile), &FakeDns::new());

    assert_eq!(
        server_lines(&fixture.read_output()),
        vec![
            "server http-server-1 10.0.0.5:80  check",
            "server http-server-2 10.0.0.6:80  check",
        ]
    );
}

#[test]
fn test_hosts_table_missing_scenario() {
    let fixture = Fixture::new();
    run_to_file(&fixture, Some(DiscoveryMode::HostsFile), &FakeDns::new());

    let doc = fixture.read_output();
    assert!(server_lines(&doc).is_empty());
    assert!(doc.contains("backend http-backend"));
    assert!(doc.contains("listen stats"));
}

#[test]
fn test_dns_fallback_scenario() {
    let fixture = Fixture::new().with_servers(&["web.svc", "legacy.internal:8080", "api.svc"]);
    let dns = FakeDns::new()
        .with("web.svc", &["10.0.0.2", "10.0.0.10"])
        .with("api.svc", &["10.0.0.10", "10.0.0.3"]);
    run_to_file(&fixture, Some(DiscoveryMode::Dns), &dns);

    assert_eq!(
        server_lines(&fixture.read_output()),
        vec![
            "server legacy-internal-1 legacy.internal:8080  check",
            "server web-svc-10-0-0-2 10.0.0.2:80  check",
            "server api-svc-10-0-0-10 10.0.0.10:80  check",
            "server api-svc-10-0-0-3 10.0.0.3:80  check",
        ]
    );
    assert_eq!(
        fixture.read_side_file().as_deref(),
        Some("10.0.0.10 10.0.0.2 10.0.0.3")
    );
}

#[test]
fn test_dns_all_failed_writes_empty_side_file() {
    let fixture = Fixture::new().with_servers(&["nowhere.invalid"]);
    run_to_file(&fixture, Some(DiscoveryMode::Dns), &FakeDns::new());

    assert_eq!(
        server_lines(&fixture.read_output()),
        vec!["server nowhere-invalid-0 nowhere.invalid:80  check"]
    );
    assert_eq!(fixture.read_side_file().as_deref(), Some(""));
}

#[test]
fn test_unknown_mode_renders_static_sections() {
    let fixture = Fixture::new().with_servers(&["10.0.0.1"]);
    run_to_file(&fixture, None, &FakeDns::new());

    let doc = fixture.read_output();
    assert!(server_lines(&doc).is_empty());
    assert!(doc.contains("frontend http-frontend"));
}

#[test]
fn test_flags_change_tokens() {
    let mut fixture = Fixture::new().with_servers(&["10.0.0.1"]);
    fixture.config.backend.cookies = true;
    fixture.config.frontend.proxy_protocol = true;
    run_to_file(&fixture, Some(DiscoveryMode::Explicit), &FakeDns::new());

    let doc = fixture.read_output();
    assert!(doc.contains("    bind *:5000 accept-proxy\n"));
    assert_eq!(
        server_lines(&doc),
        vec!["server 10-0-0-1-0 10.0.0.1:80 cookie value check"]
    );
}

#[test]
fn test_unbound_base_placeholder_is_fatal() {
    let fixture = Fixture::new().with_servers(&["10.0.0.1"]);
    fs::write(&fixture.config.paths.base_template, "global\n  maxconn $MAXCONN\n").unwrap();

    let err = run(
        Some(DiscoveryMode::Explicit),
        &fixture.config,
        &FakeDns::new(),
        &DocumentSink::File(fixture.output_path()),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        GenerateError::Render(TemplateError::UnboundPlaceholder { ref name }) if name == "MAXCONN"
    ));
    assert!(!fixture.output_path().exists());
}

#[test]
fn test_missing_base_template_is_fatal() {
    let fixture = Fixture::new();
    fs::remove_file(&fixture.config.paths.base_template).unwrap();

    let err = generate(Some(DiscoveryMode::Explicit), &fixture.config, &FakeDns::new()).unwrap_err();
    assert!(matches!(err, GenerateError::ReadTemplate { .. }));
}

#[test]
fn test_rerun_is_byte_identical() {
    let fixture = Fixture::new().with_servers(&["a.svc:81", "b.svc"]);
    let dns = FakeDns::new()
        .with("a.svc", &["10.1.0.1", "10.1.0.2"])
        .with("b.svc", &["10.1.0.2"]);

    run_to_file(&fixture, Some(DiscoveryMode::Dns), &dns);
    let first = fixture.read_output();
    run_to_file(&fixture, Some(DiscoveryMode::Dns), &dns);
    assert_eq!(first, fixture.read_output());
}

#[test]
fn test_demo_files_render() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut config =
        haproxy_confgen::config::loader::read_config_file(&root.join("demos/confgen.toml")).unwrap();
    assert!(haproxy_confgen::config::validation::validate_config(&config).is_ok());

    config.paths.base_template = root.join("demos/haproxy.cfg");
    let doc = generate(Some(DiscoveryMode::Explicit), &config, &FakeDns::new())
        .unwrap()
        .document;
    assert!(doc.contains("timeout connect 5000\n"));
    assert_eq!(
        server_lines(&doc),
        vec![
            "server web-1-internal-0 web-1.internal:8080  check",
            "server web-2-internal-1 web-2.internal:80  check",
        ]
    );
}
