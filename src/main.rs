//! HAProxy configuration generator (one-shot).
//!
//! ```text
//! haproxy-confgen <dns|env|hosts>
//!     → load config (defaults → --config TOML → legacy env vars)
//!     → discover backends for the selected mode
//!     → render base, stats, frontend, backend, health sections
//!     → write haproxy.cfg (+ dns.backends in DNS mode)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use haproxy_confgen::config::{self, GeneratorConfig};
use haproxy_confgen::observability::logging;
use haproxy_confgen::{DiscoveryMode, DocumentSink, GenerateError, SystemResolver};

#[derive(Parser, Debug)]
#[command(name = "haproxy-confgen")]
#[command(about = "Generate an HAProxy configuration from discovered backends", long_about = None)]
struct Cli {
    /// Discovery mode: dns, env or hosts. Anything else renders static sections only.
    mode: String,

    /// TOML configuration file (environment variables still take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generated configuration path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base template path
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Host-alias table scanned in hosts mode
    #[arg(long)]
    hosts_file: Option<PathBuf>,

    /// Resolved address list written in DNS mode
    #[arg(long)]
    dns_side_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the document on stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,
}

impl Cli {
    fn apply_paths(&self, config: &mut GeneratorConfig) {
        if let Some(p) = &self.output {
            config.paths.output = p.clone();
        }
        if let Some(p) = &self.template {
            config.paths.base_template = p.clone();
        }
        if let Some(p) = &self.hosts_file {
            config.paths.hosts_file = p.clone();
        }
        if let Some(p) = &self.dns_side_file {
            config.paths.dns_side_file = p.clone();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = config::load_config(cli.config.as_deref(), |k| std::env::var(k).ok());

    let level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.observability.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    logging::init(&level);

    match loaded.map_err(GenerateError::from).and_then(|config| execute(&cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Configuration generation failed");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli, mut config: GeneratorConfig) -> Result<(), GenerateError> {
    cli.apply_paths(&mut config);

    tracing::info!(
        frontend = %config.frontend.name,
        backend = %config.backend.name,
        servers = config.backend.servers.len(),
        output = %config.paths.output.display(),
        "Configuration loaded"
    );

    let mode = match cli.mode.parse::<DiscoveryMode>() {
        Ok(mode) => {
            tracing::info!(mode = %mode, "Discovery mode selected");
            Some(mode)
        }
        Err(other) => {
            tracing::warn!(mode = %other, "Unrecognized discovery mode, rendering static sections only");
            None
        }
    };

    let sink = if cli.stdout {
        DocumentSink::Stdout
    } else {
        DocumentSink::File(config.paths.output.clone())
    };

    let resolver = (mode == Some(DiscoveryMode::Dns)).then(SystemResolver::from_system_conf);
    haproxy_confgen::run(mode, &config, &resolver, &sink)?;

    Ok(())
}
