//! Output files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assemble::assembler::Assembled;

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Create or truncate `path` and write `content` fully.
pub fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    fs::write(path, content).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "File written");
    Ok(())
}

/// Destination of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSink {
    File(PathBuf),
    Stdout,
}

/// Write the document to `sink` and the side file, if any, to `side_file`.
pub fn write_outputs(
    assembled: &Assembled,
    sink: &DocumentSink,
    side_file: &Path,
) -> Result<(), WriteError> {
    if let Some(line) = &assembled.side_file {
        write_file(side_file, line)?;
    }

    match sink {
        DocumentSink::File(path) => write_file(path, &assembled.document),
        DocumentSink::Stdout => {
            use std::io::Write;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(assembled.document.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| WriteError {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}
