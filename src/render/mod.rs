//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! GeneratorConfig / BackendSpec
//!     → sections.rs (typed section values, one per block or server line)
//!     → bindings (placeholder → literal value)
//!     → template.rs (parse once, substitute, fail on unbound names)
//!     → text fragment
//! ```

pub mod sections;
pub mod template;

pub use sections::{
    BackendHeader, BaseSection, FrontendSection, Section, ServerLine, StatsSection, HEALTH_SECTION,
};
pub use template::{render, Bindings, Template, TemplateError};
