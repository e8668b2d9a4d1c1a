//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (parse totals, skipped lines, reloads)
//!     → logging.rs subscriber (filtered, formatted to stderr)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings where practical
//! - Library code never installs a subscriber; binaries call `init_logging`

pub mod logging;
