//! HAProxy configuration generator.
//!
//! Discovers backend servers once (explicit list, DNS, or host-alias table),
//! renders them with the static sections into a single HAProxy config, and
//! writes it out. Runs to completion; nothing is watched or retried.

pub mod assemble;
pub mod config;
pub mod discovery;
pub mod error;
pub mod observability;
pub mod render;

use std::fs;

pub use assemble::{Assembled, ConfigAssembler, DocumentSink};
pub use config::GeneratorConfig;
pub use discovery::{DiscoveryMode, HostLookup, SystemResolver};
pub use error::GenerateError;

use crate::discovery::Discovered;
use crate::render::Template;

/// Read the base template, discover backends and render the document.
///
/// `mode == None` skips discovery and renders the static sections only.
pub fn generate<L: HostLookup>(
    mode: Option<DiscoveryMode>,
    config: &GeneratorConfig,
    lookup: &L,
) -> Result<Assembled, GenerateError> {
    let path = &config.paths.base_template;
    let source = fs::read_to_string(path).map_err(|source| GenerateError::ReadTemplate {
        path: path.clone(),
        source,
    })?;
    let base = Template::parse(&source)?;

    let discovered = match mode {
        Some(mode) => discovery::resolve(mode, config, lookup)?,
        None => Discovered::default(),
    };

    Ok(ConfigAssembler::new(config).assemble(&base, &discovered)?)
}

/// [`generate`], then write the document to `sink` and the DNS side file.
pub fn run<L: HostLookup>(
    mode: Option<DiscoveryMode>,
    config: &GeneratorConfig,
    lookup: &L,
    sink: &DocumentSink,
) -> Result<Assembled, GenerateError> {
    let assembled = generate(mode, config, lookup)?;
    assemble::write_outputs(&assembled, sink, &config.paths.dns_side_file)?;
    Ok(assembled)
}
