//! Top-level error for a generator run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::assemble::WriteError;
use crate::config::ConfigError;
use crate::discovery::TokenError;
use crate::render::TemplateError;

/// Any failure that aborts the run. Per-entry problems (a host that does not
/// resolve, a missing hosts file) are recovered earlier and never reach here.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read base template {}: {source}", .path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Render(#[from] TemplateError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
