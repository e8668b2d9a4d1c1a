//! Stanza configuration engine for a proxy gateway.
//!
//! Parses flat, marker-delimited stanza files into ordered records, renders
//! them back to text, derives the origins each stanza answers for, and looks
//! stanzas up by name prefix or URL.

pub mod catalog;
pub mod config;
pub mod observability;
pub mod routing;
pub mod stanza;

pub use catalog::ProxyCatalog;
pub use config::GatewayConfig;
pub use routing::{origin_matches, origins_of, search, SearchHit, SearchQuery};
pub use stanza::{parse_all, render, Stanza, StanzaError};
