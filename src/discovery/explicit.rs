//! Explicit backend list strategy.

use crate::discovery::token::HostPort;
use crate::discovery::{BackendSource, BackendSpec, Discovered, ServerIndex};

/// Renders the configured tokens as-is, in order.
///
/// Duplicate hosts are not collapsed; each token yields one server.
#[derive(Debug, Clone)]
pub struct ExplicitList {
    tokens: Vec<HostPort>,
    default_port: u16,
}

impl ExplicitList {
    pub fn new(tokens: Vec<HostPort>, default_port: u16) -> Self {
        Self {
            tokens,
            default_port,
        }
    }
}

impl BackendSource for ExplicitList {
    fn discover(&self) -> Discovered {
        let backends = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, t)| {
                BackendSpec::for_host(&t.host, t.port_or(self.default_port), ServerIndex::Position(i))
            })
            .collect();

        Discovered {
            backends,
            resolved: None,
        }
    }
}
