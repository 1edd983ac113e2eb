//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, discovery, assembly
//!     → tracing events with structured fields (host, path, count, error)
//!     → logging.rs subscriber (EnvFilter + fmt layer)
//!     → stderr
//! ```

pub mod logging;
