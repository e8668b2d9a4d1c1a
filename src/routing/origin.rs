//! Origin derivation.
//!
//! # Responsibilities
//! - Reduce a URL-like directive value to scheme, host, and port
//! - Render the canonical origin string
//! - Collect the origins a stanza answers for
//!
//! # Design Decisions
//! - A value without `//` is read as a bare authority (`//` is prepended)
//! - Scheme-less origins render with a leading `//`
//! - Explicit ports are kept even when they are the scheme default
//! - Hosts and schemes are lower-cased; host syntax is checked by `url::Host`

use std::collections::BTreeSet;
use std::fmt;

use crate::stanza::model::Stanza;
use crate::stanza::types::{StanzaError, StanzaResult};

/// Directive keys whose values contribute origins.
pub const ORIGIN_KEYS: &[&str] = &["URL", "Host", "HostJavascript"];

/// Scheme, host, and port of a URL-like value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    pub scheme: Option<String>,
    pub host: String,
    pub port: Option<u16>,
}

impl Origin {
    /// Parse a URL-like value, prepending `//` when it has none.
    pub fn parse(value: &str) -> StanzaResult<Self> {
        let invalid = |reason: &str| StanzaError::InvalidOrigin {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        let owned;
        let input = if trimmed.contains("//") {
            trimmed
        } else {
            owned = format!("//{trimmed}");
            owned.as_str()
        };

        let authority_start = input.find("//").ok_or_else(|| invalid("missing authority"))?;
        let prefix = &input[..authority_start];
        let scheme = if prefix.is_empty() {
            None
        } else {
            match prefix.strip_suffix(':') {
                Some(name) if is_scheme(name) => Some(name.to_ascii_lowercase()),
                _ => return Err(invalid("authority is not at the start of the value")),
            }
        };

        let rest = &input[authority_start + 2..];
        let authority = rest
            .find(['/', '?', '#'])
            .map_or(rest, |end| &rest[..end]);
        let host_port = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host_port)| host_port);

        let (host, port) = split_host_port(host_port).ok_or_else(|| invalid("malformed host"))?;
        let port = match port {
            None | Some("") => None,
            Some(digits) => Some(digits.parse::<u16>().map_err(|_| invalid("invalid port"))?),
        };

        let host = url::Host::parse(host).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
        })
    }

    /// Whether a query origin falls under this stored origin.
    ///
    /// Host must be equal. Scheme and port only constrain the query when this
    /// origin specifies them.
    pub fn covers(&self, query: &Origin) -> bool {
        let host_matches = self.host == query.host;
        let scheme_matches = self.scheme.is_none() || self.scheme == query.scheme;
        let port_matches = self.port.is_none() || self.port == query.port;
        host_matches && scheme_matches && port_matches
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}://{}", scheme, self.host)?,
            None => write!(f, "//{}", self.host)?,
        }
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

fn is_scheme(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split `host[:port]`, keeping IPv6 brackets on the host.
fn split_host_port(host_port: &str) -> Option<(&str, Option<&str>)> {
    if host_port.starts_with('[') {
        let close = host_port.find(']')?;
        let (host, after) = host_port.split_at(close + 1);
        return match after {
            "" => Some((host, None)),
            _ => after.strip_prefix(':').map(|port| (host, Some(port))),
        };
    }
    Some(match host_port.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    })
}

/// Canonical origin string for a URL-like value.
pub fn canonicalize_origin(value: &str) -> StanzaResult<String> {
    Origin::parse(value).map(|origin| origin.to_string())
}

/// The set of canonical origins a stanza matches.
///
/// Values that cannot be reduced to an origin are skipped.
pub fn origins_of(stanza: &Stanza) -> BTreeSet<String> {
    let mut origins = BTreeSet::new();
    for (key, value) in stanza.directives.iter() {
        if !ORIGIN_KEYS.contains(&key) {
            continue;
        }
        for raw in value.values() {
            match canonicalize_origin(raw) {
                Ok(origin) => {
                    origins.insert(origin);
                }
                Err(err) => {
                    tracing::warn!(stanza = %stanza.name, directive = key, error = %err, "Skipping origin");
                }
            }
        }
    }
    origins
}
