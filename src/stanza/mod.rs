//! Stanza configuration subsystem.
//!
//! # Data Flow
//! ```text
//! raw config text
//!     → extract.rs (marker-delimited line groups)
//!     → parser.rs (directive lines → normalized key/value)
//!     → directives.rs (ordered map, repeated keys merge)
//!     → model.rs (Stanza: name, group, directives)
//!
//! Persistence:
//!     Vec<Stanza> → serializer.rs → canonical text
//! ```
//!
//! # Design Decisions
//! - Stanzas are immutable once built
//! - Parse → render → parse reproduces names, groups, and directive maps
//! - Everything here is synchronous and free of shared state

pub mod directives;
pub mod extract;
pub mod model;
pub mod parser;
pub mod serializer;
pub mod types;

pub use directives::{DirectiveMap, DirectiveValue};
pub use model::{stanzas_from_json, Stanza};
pub use parser::{parse_all, ParseOptions, StanzaParser};
pub use serializer::render;
pub use types::{StanzaError, StanzaResult};
