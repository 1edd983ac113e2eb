//! `host[:port]` token parsing.

use thiserror::Error;

/// A malformed backend token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("backend token `{0}` has an empty host")]
    EmptyHost(String),

    #[error("backend token `{0}` has more than one `:`")]
    TooManyColons(String),

    #[error("backend token `{token}` has an invalid port `{port}`")]
    InvalidPort { token: String, port: String },
}

/// One parsed entry of the explicit backend list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    /// Explicit port, if the token carried one.
    pub port: Option<u16>,
}

impl HostPort {
    /// Parse a single `host[:port]` token.
    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let mut parts = token.split(':');
        let host = parts.next().unwrap_or_default();
        let port = parts.next();

        if parts.next().is_some() {
            return Err(TokenError::TooManyColons(token.to_string()));
        }
        if host.is_empty() {
            return Err(TokenError::EmptyHost(token.to_string()));
        }

        let port = match port {
            None => None,
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p != 0 => Some(p),
                _ => {
                    return Err(TokenError::InvalidPort {
                        token: token.to_string(),
                        port: raw.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    /// The explicit port, or `default_port` when the token had none.
    pub fn port_or(&self, default_port: u16) -> u16 {
        self.port.unwrap_or(default_port)
    }
}

/// Parse every non-empty token, failing on the first malformed one.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<HostPort>, TokenError> {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .map(HostPort::parse)
        .collect()
}
