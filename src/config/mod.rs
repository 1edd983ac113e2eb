//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → legacy environment variables (env.rs)
//!     → validation.rs (semantic checks)
//!     → GeneratorConfig (validated, immutable)
//!     → passed by reference to discovery and assembly
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendConfig, DiscoveryConfig, DnsPortPolicy, FrontendConfig, GeneratorConfig, PathsConfig,
    StatsConfig, TimeoutConfig,
};
