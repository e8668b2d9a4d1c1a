//! Origin matching and stanza lookup.
//!
//! # Data Flow
//! ```text
//! Stanza directives (URL, Host, HostJavascript)
//!     → origin.rs (canonical origins, derived on demand)
//!     → matcher.rs (query URL vs stored origin, name prefix)
//!     → search.rs (position + name hits)
//! ```
//!
//! # Design Decisions
//! - Origins are derived, never stored on the stanza
//! - Deterministic: same stanzas and query always give the same hits
//! - No regex; prefix and equality checks only

pub mod matcher;
pub mod origin;
pub mod search;

pub use matcher::origin_matches;
pub use origin::{canonicalize_origin, origins_of, Origin};
pub use search::{search, search_json, SearchHit, SearchQuery};
