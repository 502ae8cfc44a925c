//! Core data structures shared by the parser, canonicalizer and formatter.

use std::fmt;

/// Schemes that never carry an authority and are passed through verbatim.
pub const OPAQUE_SCHEMES: [&str; 4] = ["dns", "mailto", "filedesc", "warcinfo"];

/// Whether `scheme` (already lowercased) is one of the opaque schemes.
pub fn is_opaque_scheme(scheme: &str) -> bool {
    OPAQUE_SCHEMES.contains(&scheme)
}

/// Well-known port for a scheme, used when stripping default ports.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// The `[user[:password]@]host[:port]` part of a host-bearing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    /// Basic-auth user name
    pub user: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Hostname, dotted IPv4 address or bracketed IPv6 literal
    pub host: String,
    /// Explicit port number
    pub port: Option<u16>,
}

impl Authority {
    /// Create an authority with only a host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            user: None,
            password: None,
            host: host.into(),
            port: None,
        }
    }

    /// Serialized `user[:password]@` prefix, or an empty string.
    pub fn userinfo(&self) -> String {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => format!("{user}:{password}@"),
            (Some(user), None) => format!("{user}@"),
            (None, Some(password)) => format!(":{password}@"),
            (None, None) => String::new(),
        }
    }
}

/// A single `key` or `key=value` entry of a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPair {
    pub key: String,
    /// `None` for a bare flag such as `b` in `?b&a`
    pub value: Option<String>,
}

impl QueryPair {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Split a raw `key=value` token on its first `=`.
    pub fn from_token(token: &str) -> Self {
        match token.split_once('=') {
            Some((key, value)) => Self::new(key, Some(value.to_string())),
            None => Self::new(token, None),
        }
    }

    /// The serialized token, used both for output and for ordering.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

/// The working representation of one URL, owned by a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Lowercased scheme (http, https, ftp, dns, ...)
    pub scheme: String,
    /// `None` for opaque URLs
    pub authority: Option<Authority>,
    /// Path segments after the leading `/`. Empty means no path, `[""]` means `/`.
    pub path: Vec<String>,
    /// `None` means no `?`; an empty list means a bare `?`
    pub query: Option<Vec<QueryPair>>,
    /// Never altered and never emitted
    pub fragment: Option<String>,
    /// The input exactly as supplied
    pub raw: String,
}

impl ParsedUrl {
    /// An opaque URL that is formatted back as `raw`.
    pub fn opaque(scheme: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            authority: None,
            path: Vec::new(),
            query: None,
            fragment: None,
            raw: raw.into(),
        }
    }

    /// Whether this URL is passed through verbatim.
    pub fn is_opaque(&self) -> bool {
        self.authority.is_none()
    }

    /// The host, if the URL has an authority.
    pub fn host(&self) -> Option<&str> {
        self.authority.as_ref().map(|auth| auth.host.as_str())
    }

    /// Serialized path with its leading `/`, or an empty string.
    pub fn path_str(&self) -> String {
        if self.path.is_empty() {
            String::new()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }

    /// Serialized query without the leading `?`.
    pub fn query_str(&self) -> Option<String> {
        self.query.as_ref().map(|pairs| {
            pairs
                .iter()
                .map(QueryPair::token)
                .collect::<Vec<_>>()
                .join("&")
        })
    }
}
