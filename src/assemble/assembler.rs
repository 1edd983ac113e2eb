//! Configuration document assembly.
//!
//! # Responsibilities
//! - Render base, stats, frontend and backend sections from static config
//! - Render one server line per discovered backend, in discovery order
//! - Append the health-check listener last
//! - Produce the DNS side-file line when discovery resolved addresses

use crate::config::GeneratorConfig;
use crate::discovery::Discovered;
use crate::render::{
    BackendHeader, BaseSection, FrontendSection, Section, ServerLine, StatsSection, Template,
    TemplateError, HEALTH_SECTION,
};

/// Rendered output of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    /// Sections in fixed order: base, stats, frontend, backend, health.
    pub document: String,
    /// Sorted, space-separated resolved addresses (DNS mode only).
    pub side_file: Option<String>,
}

/// Builds the configuration document from static config and backends.
#[derive(Debug)]
pub struct ConfigAssembler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ConfigAssembler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render every section and concatenate them.
    ///
    /// Any rendering failure aborts the whole document.
    pub fn assemble(
        &self,
        base_template: &Template,
        discovered: &Discovered,
    ) -> Result<Assembled, TemplateError> {
        let config = self.config;
        let mut document = String::new();

        let base = BaseSection {
            logging: config.logging.target.clone(),
            timeout_connect: config.timeouts.connect.clone(),
            timeout_client: config.timeouts.client.clone(),
            timeout_server: config.timeouts.server.clone(),
        };
        document.push_str(&base.render(base_template)?);

        document.push_str(
            &StatsSection {
                port: config.stats.port,
                auth: config.stats.auth.clone(),
            }
            .render()?,
        );

        document.push_str(
            &FrontendSection {
                name: config.frontend.name.clone(),
                port: config.frontend.port,
                backend: config.backend.name.clone(),
                accept_proxy: config.frontend.proxy_protocol,
            }
            .render()?,
        );

        document.push_str(
            &BackendHeader {
                backend: config.backend.name.clone(),
                balance: config.backend.balance.clone(),
            }
            .render()?,
        );

        let server_template = Template::parse(ServerLine::TEMPLATE)?;
        for spec in &discovered.backends {
            let line = ServerLine::from_spec(spec, config.backend.cookies);
            document.push_str(&server_template.render(&line.bindings())?);
        }

        document.push_str(HEALTH_SECTION);

        Ok(Assembled {
            document,
            side_file: discovered.resolved.as_ref().map(|set| set.side_file_line()),
        })
    }
}
