//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!
//! Stanza file:
//!     GatewayConfig.source → ProxyCatalog::load_file
//!     watcher.rs detects change
//!     → re-parse with the configured ParseOptions
//!     → new Vec<Stanza> sent over a channel
//!     → holder swaps it into its catalog
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A stanza file that fails to parse never replaces the current stanzas

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ObservabilityConfig;
pub use schema::SearchConfig;
pub use schema::SourceConfig;
