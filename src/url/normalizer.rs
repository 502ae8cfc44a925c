//! Baseline normalization applied to every host-bearing URL while parsing.
//!
//! This is independent of the option set: hosts are decoded, IDNA-converted
//! and IP-coerced, and paths have their dot segments resolved.

use std::net::Ipv4Addr;

use url::Host;

use crate::error::SurtError;
use crate::url::escape::{escape_host, normalize_escapes, unescape_repeatedly};

/// Normalize a raw host according to SURT requirements.
///
/// This function:
/// 1. Validates and canonicalizes bracketed IPv6 literals
/// 2. Decodes percent-escapes completely
/// 3. Applies IDNA ASCII conversion to non-ASCII hosts
/// 4. Collapses runs of dots and trims leading and trailing dots
/// 5. Rewrites numeric IPv4 forms as dotted quads
/// 6. Re-escapes bytes that cannot appear in a host
///
/// Case is preserved for ASCII hosts; lowercasing is a canonicalization rule.
pub fn normalize_host(raw: &str) -> Result<String, SurtError> {
    if raw.starts_with('[') {
        return match Host::parse(raw) {
            Ok(Host::Ipv6(addr)) => Ok(format!("[{addr}]")),
            _ => Err(SurtError::UrlParseError(format!(
                "invalid IPv6 literal `{raw}`"
            ))),
        };
    }

    let mut bytes = unescape_repeatedly(raw.as_bytes());

    if let Ok(text) = std::str::from_utf8(&bytes) {
        if !text.is_ascii() {
            if let Ok(ascii) = idna::domain_to_ascii(text) {
                bytes = ascii.into_bytes();
            }
        }
    }

    let bytes = collapse_dots(&bytes);

    if let Ok(text) = std::str::from_utf8(&bytes) {
        if let Some(addr) = coerce_ipv4(text) {
            return Ok(addr.to_string());
        }
    }

    Ok(escape_host(&bytes))
}

/// Remove empty labels: `www.google.com...` becomes `www.google.com`.
fn collapse_dots(host: &[u8]) -> Vec<u8> {
    host.split(|&b| b == b'.')
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(&b'.')
}

/// Interpret a host as an IPv4 address in any of its legacy spellings.
///
/// A bare decimal integer is taken modulo 2^32, as numeric hosts larger
/// than 32 bits occur in crawled data. Other forms (octal, hexadecimal and
/// shortened dotted notation) follow the WHATWG host parser.
pub fn coerce_ipv4(host: &str) -> Option<Ipv4Addr> {
    if host.is_empty() {
        return None;
    }

    if host.bytes().all(|b| b.is_ascii_digit()) {
        let value = host.parse::<u128>().ok()?;
        return Some(Ipv4Addr::from((value & 0xffff_ffff) as u32));
    }

    match Host::parse(host) {
        Ok(Host::Ipv4(addr)) => Some(addr),
        _ => None,
    }
}

/// Split a raw path into normalized segments.
///
/// Each segment has its escapes normalized, `.` segments are dropped, `..`
/// removes the previous segment and interior empty segments are removed. A
/// trailing empty segment (a trailing slash) is kept. An empty path becomes
/// `/`, represented as a single empty segment.
pub fn normalize_path(raw: &str) -> Result<Vec<String>, SurtError> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let mut kept: Vec<String> = Vec::new();

    for segment in trimmed.split('/') {
        let segment = normalize_escapes(segment)?;
        match segment.as_str() {
            "." => {}
            ".." => {
                if kept.pop().is_none() {
                    kept.push(segment);
                }
            }
            _ => kept.push(segment),
        }
    }

    let last = kept.pop().unwrap_or_default();
    let mut segments: Vec<String> = kept.into_iter().filter(|s| !s.is_empty()).collect();
    segments.push(last);

    Ok(segments)
}
