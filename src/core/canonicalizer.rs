//! The ordered canonicalization rule pipeline.
//!
//! Each rule is paired with the option that enables it. Rules run in the
//! order of [`RULES`]; host rules come first and the query is lowercased
//! before it is reordered.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::core::matcher::{strip_path_session_ids, strip_query_session_ids};
use crate::error::SurtError;
use crate::options::{OptionName, Options};
use crate::types::{default_port, Authority, ParsedUrl};
use crate::url::psl::registrable_domain;

/// A single canonicalization step applied to a host-bearing URL.
pub type Rule = fn(&mut ParsedUrl) -> Result<(), SurtError>;

/// Every rule, in application order, keyed by the option that enables it.
pub const RULES: [(OptionName, Rule); 14] = [
    (OptionName::HostLowercase, host_lowercase),
    (OptionName::HostMassage, host_massage),
    (OptionName::PublicSuffix, public_suffix),
    (OptionName::AuthStripUser, auth_strip_user),
    (OptionName::AuthStripPass, auth_strip_pass),
    (OptionName::PortStripDefault, port_strip_default),
    (OptionName::PathLowercase, path_lowercase),
    (OptionName::PathStripSessionId, path_strip_session_id),
    (
        OptionName::PathStripTrailingSlashUnlessEmpty,
        path_strip_trailing_slash_unless_empty,
    ),
    (OptionName::PathStripEmpty, path_strip_empty),
    (OptionName::QueryStripSessionId, query_strip_session_id),
    (OptionName::QueryLowercase, query_lowercase),
    (OptionName::QueryAlphaReorder, query_alpha_reorder),
    (OptionName::QueryStripEmpty, query_strip_empty),
];

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static WWW_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^www\d*\.").expect("static regex should not panic"));

/// Apply every enabled rule to a parsed URL.
///
/// Opaque URLs are returned untouched.
///
/// # Arguments
///
/// * `url` - The parsed URL to canonicalize
/// * `options` - The resolved option set; a rule runs only when its option is on
///
/// # Examples
///
/// ```
/// use surt::{canonicalize, parse, Options};
///
/// let url = parse("http://WWW.Archive.org:80/Goo/?b&a").unwrap();
/// let url = canonicalize(url, &Options::default()).unwrap();
///
/// assert_eq!(url.host(), Some("archive.org"));
/// assert_eq!(url.path_str(), "/goo");
/// assert_eq!(url.query_str().as_deref(), Some("a&b"));
/// ```
pub fn canonicalize(mut url: ParsedUrl, options: &Options) -> Result<ParsedUrl, SurtError> {
    if url.is_opaque() {
        return Ok(url);
    }

    for (name, rule) in RULES {
        if options.get(name) {
            rule(&mut url)?;
            trace!(rule = %name, "applied canonicalization rule");
        }
    }

    Ok(url)
}

fn authority(url: &mut ParsedUrl) -> Result<&mut Authority, SurtError> {
    let ParsedUrl { authority, raw, .. } = url;
    authority
        .as_mut()
        .ok_or_else(|| SurtError::CanonicalizerError(format!("`{raw}` has no authority")))
}

/// Lowercase the host.
pub fn host_lowercase(url: &mut ParsedUrl) -> Result<(), SurtError> {
    let auth = authority(url)?;
    auth.host = auth.host.to_ascii_lowercase();
    Ok(())
}

/// Strip a single leading `www.` or `www<digits>.` label.
pub fn host_massage(url: &mut ParsedUrl) -> Result<(), SurtError> {
    let auth = authority(url)?;
    if let Some(prefix) = WWW_PREFIX.find(&auth.host) {
        auth.host = auth.host[prefix.end()..].to_string();
    }
    Ok(())
}

/// Reduce the host to its registrable domain.
pub fn public_suffix(url: &mut ParsedUrl) -> Result<(), SurtError> {
    let auth = authority(url)?;
    if let Some(domain) = registrable_domain(&auth.host) {
        auth.host = domain;
    }
    Ok(())
}

/// Remove the user name, and with it the password.
pub fn auth_strip_user(url: &mut ParsedUrl) -> Result<(), SurtError> {
    let auth = authority(url)?;
    auth.user = None;
    auth.password = None;
    Ok(())
}

pub fn auth_strip_pass(url: &mut ParsedUrl) -> Result<(), SurtError> {
    authority(url)?.password = None;
    Ok(())
}

/// Remove a port equal to the scheme's well-known port.
pub fn port_strip_default(url: &mut ParsedUrl) -> Result<(), SurtError> {
    let default = default_port(&url.scheme);
    let auth = authority(url)?;
    if auth.port.is_some() && auth.port == default {
        auth.port = None;
    }
    Ok(())
}

pub fn path_lowercase(url: &mut ParsedUrl) -> Result<(), SurtError> {
    for segment in &mut url.path {
        segment.make_ascii_lowercase();
    }
    Ok(())
}

pub fn path_strip_session_id(url: &mut ParsedUrl) -> Result<(), SurtError> {
    strip_path_session_ids(&mut url.path);
    Ok(())
}

/// Drop a trailing slash unless the path is only `/`.
pub fn path_strip_trailing_slash_unless_empty(url: &mut ParsedUrl) -> Result<(), SurtError> {
    if url.path.len() > 1 && url.path.last().is_some_and(String::is_empty) {
        url.path.pop();
    }
    Ok(())
}

/// Drop a path that is only `/`.
pub fn path_strip_empty(url: &mut ParsedUrl) -> Result<(), SurtError> {
    if url.path.len() == 1 && url.path[0].is_empty() {
        url.path.clear();
    }
    Ok(())
}

pub fn query_strip_session_id(url: &mut ParsedUrl) -> Result<(), SurtError> {
    if let Some(pairs) = url.query.as_mut() {
        strip_query_session_ids(pairs);
    }
    Ok(())
}

/// Lowercase each query key and value.
pub fn query_lowercase(url: &mut ParsedUrl) -> Result<(), SurtError> {
    for pair in url.query.iter_mut().flatten() {
        pair.key.make_ascii_lowercase();
        if let Some(value) = pair.value.as_mut() {
            value.make_ascii_lowercase();
        }
    }
    Ok(())
}

/// Stable sort of the query by serialized token.
pub fn query_alpha_reorder(url: &mut ParsedUrl) -> Result<(), SurtError> {
    if let Some(pairs) = url.query.as_mut() {
        pairs.sort_by_cached_key(|pair| pair.token());
    }
    Ok(())
}

/// Drop a query with no pairs left, so no bare `?` is emitted.
pub fn query_strip_empty(url: &mut ParsedUrl) -> Result<(), SurtError> {
    if url.query.as_ref().is_some_and(Vec::is_empty) {
        url.query = None;
    }
    Ok(())
}
