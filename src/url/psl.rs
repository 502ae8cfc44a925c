//! Public Suffix List integration for registrable-domain reduction.

use psl::{List, Psl};

/// Reduce a host to its registrable domain using the Public Suffix List.
///
/// `www.images.amazon.co.uk` becomes `amazon.co.uk`. Returns `None` when the
/// host has no registrable domain: IP literals, bare public suffixes and
/// single-label hosts.
pub fn registrable_domain(host: &str) -> Option<String> {
    if host.starts_with('[') || host.parse::<std::net::Ipv4Addr>().is_ok() {
        return None;
    }

    let domain = List.domain(host.as_bytes())?;
    std::str::from_utf8(domain.as_bytes()).ok().map(str::to_string)
}
