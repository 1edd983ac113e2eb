//! Assembly subsystem.
//!
//! # Data Flow
//! ```text
//! base template file ─┐
//! GeneratorConfig ────┼─→ assembler.rs → Assembled { document, side_file }
//! Discovered ─────────┘        → writer.rs → haproxy.cfg (+ dns.backends)
//! ```
//!
//! # Design Decisions
//! - Section order is fixed: base, stats, frontend, backend, health
//! - Rendering happens fully in memory before any file is touched

pub mod assembler;
pub mod writer;

pub use assembler::{Assembled, ConfigAssembler};
pub use writer::{write_file, write_outputs, DocumentSink, WriteError};
