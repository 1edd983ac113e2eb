//! Typed section builders.
//!
//! Each section owns its template text and produces the bindings for every
//! placeholder it uses, so a section cannot be constructed with a field
//! missing. The rendered text is byte-compatible with the historical output.

use crate::discovery::BackendSpec;
use crate::render::template::{Bindings, Template, TemplateError};

/// Health-check listener, appended verbatim.
pub const HEALTH_SECTION: &str = "\nlisten default\n  bind *:4242\n";

/// Bind-line token emitted when PROXY protocol is enabled.
pub const ACCEPT_PROXY: &str = "accept-proxy";

/// Server-line token emitted when cookies are enabled.
pub const COOKIE_VALUE: &str = "cookie value";

/// A templated configuration block.
pub trait Section {
    const TEMPLATE: &'static str;

    fn bindings(&self) -> Bindings;

    fn render(&self) -> Result<String, TemplateError> {
        Template::parse(Self::TEMPLATE)?.render(&self.bindings())
    }
}

/// Values for the externally supplied base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseSection {
    pub logging: String,
    pub timeout_connect: String,
    pub timeout_client: String,
    pub timeout_server: String,
}

impl BaseSection {
    pub fn bindings(&self) -> Bindings {
        Bindings::new()
            .with("LOGGING", &self.logging)
            .with("TIMEOUT_CONNECT", &self.timeout_connect)
            .with("TIMEOUT_CLIENT", &self.timeout_client)
            .with("TIMEOUT_SERVER", &self.timeout_server)
    }

    /// Fill `template`; fails if it references anything beyond the four keys.
    pub fn render(&self, template: &Template) -> Result<String, TemplateError> {
        template.render(&self.bindings())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSection {
    pub port: u16,
    pub auth: String,
}

impl Section for StatsSection {
    const TEMPLATE: &'static str = "
  listen stats
    bind *:$port
    stats enable
    stats uri /
    stats hide-version
    stats auth $auth
";

    fn bindings(&self) -> Bindings {
        Bindings::new()
            .with("port", self.port)
            .with("auth", &self.auth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendSection {
    pub name: String,
    pub port: u16,
    pub backend: String,
    pub accept_proxy: bool,
}

impl Section for FrontendSection {
    const TEMPLATE: &'static str = "
  frontend $name
    bind *:$port $accept_proxy
    mode http
    default_backend $backend
";

    fn bindings(&self) -> Bindings {
        Bindings::new()
            .with("name", &self.name)
            .with("port", self.port)
            .with("backend", &self.backend)
            .with("accept_proxy", if self.accept_proxy { ACCEPT_PROXY } else { "" })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHeader {
    pub backend: String,
    pub balance: String,
}

impl Section for BackendHeader {
    const TEMPLATE: &'static str = r"
  backend $backend
    mode http
    balance $balance
    option forwardfor
    http-request set-header X-Forwarded-Port %[dst_port]
    http-request add-header X-Forwarded-Proto https if { ssl_fc }
    option httpchk HEAD / HTTP/1.1\r\nHost:localhost
    cookie SRV_ID prefix
";

    fn bindings(&self) -> Bindings {
        Bindings::new()
            .with("backend", &self.backend)
            .with("balance", &self.balance)
    }
}

/// One `server` line of the backend block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLine {
    pub name: String,
    pub index: String,
    pub host: String,
    pub port: u16,
    pub cookies: bool,
}

impl ServerLine {
    pub fn from_spec(spec: &BackendSpec, cookies: bool) -> Self {
        Self {
            name: spec.name.clone(),
            index: spec.index.to_string(),
            host: spec.host.clone(),
            port: spec.port,
            cookies,
        }
    }
}

impl Section for ServerLine {
    const TEMPLATE: &'static str = "
    server $name-$index $host:$port $cookies check
";

    fn bindings(&self) -> Bindings {
        Bindings::new()
            .with("name", &self.name)
            .with("index", &self.index)
            .with("host", &self.host)
            .with("port", self.port)
            .with("cookies", if self.cookies { COOKIE_VALUE } else { "" })
    }
}
