//! Serialization of a canonicalized URL into a SURT key or a canonical URL.

use crate::core::matcher::is_ipv4_host;
use crate::options::Options;
use crate::types::{Authority, ParsedUrl};

/// Serialize a canonicalized URL.
///
/// Opaque URLs come back exactly as supplied. With `surt` enabled the host
/// labels are reversed and comma-joined, closed by `)`; otherwise a
/// conventional `scheme://host/path?query` URL is produced. The fragment is
/// never part of the output.
///
/// # Examples
///
/// ```
/// use surt::{canonicalize, format, parse, OptionName, Options};
///
/// let options = Options::default();
/// let url = canonicalize(parse("http://www.archive.org/goo/?b&a").unwrap(), &options).unwrap();
/// assert_eq!(format(&url, &options), "org,archive)/goo?a&b");
///
/// let options = options.with(OptionName::Surt, false);
/// assert_eq!(format(&url, &options), "http://archive.org/goo?a&b");
/// ```
pub fn format(url: &ParsedUrl, options: &Options) -> String {
    let Some(authority) = url.authority.as_ref() else {
        return url.raw.clone();
    };

    let mut out = if options.surt {
        surt_prefix(&url.scheme, authority, options)
    } else {
        url_prefix(&url.scheme, authority)
    };

    out.push_str(&tail(url));
    out
}

/// `[scheme://(]reversed,host[:port][,])`
fn surt_prefix(scheme: &str, authority: &Authority, options: &Options) -> String {
    let mut out = String::new();

    if options.with_scheme {
        out.push_str(scheme);
        out.push_str("://(");
    }

    out.push_str(&authority.userinfo());
    out.push_str(&host_key(&authority.host, options.reverse_ipaddr));

    if let Some(port) = authority.port {
        out.push(':');
        out.push_str(&port.to_string());
    }
    if options.trailing_comma {
        out.push(',');
    }

    out.push(')');
    out
}

fn url_prefix(scheme: &str, authority: &Authority) -> String {
    let mut out = format!("{scheme}://{}{}", authority.userinfo(), authority.host);
    if let Some(port) = authority.port {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out
}

/// Reverse host labels into SURT order: `www.archive.org` becomes
/// `org,archive,www`.
///
/// Dotted-quad IPv4 hosts are left in their usual order when
/// `reverse_ipaddr` is off. Bracketed IPv6 literals are never reversed.
pub fn host_key(host: &str, reverse_ipaddr: bool) -> String {
    if host.starts_with('[') || (!reverse_ipaddr && is_ipv4_host(host)) {
        return host.to_string();
    }

    host.rsplit('.').collect::<Vec<_>>().join(",")
}

/// Path and query. A bare `/` separates the host from a query when the
/// path was stripped.
fn tail(url: &ParsedUrl) -> String {
    let mut out = url.path_str();

    if let Some(query) = url.query_str() {
        if out.is_empty() {
            out.push('/');
        }
        out.push('?');
        out.push_str(&query);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionName;
    use crate::types::QueryPair;

    fn host_url(host: &str) -> ParsedUrl {
        let mut url = ParsedUrl::opaque("http", format!("http://{host}/"));
        url.authority = Some(Authority::new(host));
        url.path = vec![String::new()];
        url
    }

    #[test]
    fn test_host_key() {
        let test_cases = vec![
            ("www.archive.org", true, "org,archive,www"),
            ("www.archive.org", false, "org,archive,www"),
            ("123.123.net", false, "net,123,123"),
            ("100.100.100.100.org", false, "org,100,100,100,100"),
            ("123.45.167.89", true, "89,167,45,123"),
            ("123.45.167.89", false, "123.45.167.89"),
            ("10.162.1024.3", false, "3,1024,162,10"),
            ("990.991.992.993", false, "990.991.992.993"),
            ("foo.1.2.3.4", false, "foo.1.2.3.4"),
            ("foo.1.2.3.4", true, "4,3,2,1,foo"),
            ("[2001:db8::1]", true, "[2001:db8::1]"),
            ("localhost", true, "localhost"),
        ];

        for (host, reverse, expected) in test_cases {
            assert_eq!(host_key(host, reverse), expected, "Failed for host: {}", host);
        }
    }

    #[test]
    fn test_opaque_verbatim() {
        let url = ParsedUrl::opaque("dns", "dns:archive.org");
        assert_eq!(format(&url, &Options::default()), "dns:archive.org");
    }

    #[test]
    fn test_surt_delimiters() {
        let url = host_url("example.com");

        let options = Options::default();
        assert_eq!(format(&url, &options), "com,example)/");

        let options = options.with(OptionName::WithScheme, true);
        assert_eq!(format(&url, &options), "http://(com,example)/");

        let options = options.with(OptionName::TrailingComma, true);
        assert_eq!(format(&url, &options), "http://(com,example,)/");

        let options = options.with(OptionName::WithScheme, false);
        assert_eq!(format(&url, &options), "com,example,)/");
    }

    #[test]
    fn test_port_and_userinfo() {
        let mut url = host_url("example.com");
        let auth = url.authority.as_mut().unwrap();
        auth.port = Some(8080);
        auth.user = Some("user".to_string());

        assert_eq!(format(&url, &Options::default()), "user@com,example:8080)/");
        assert_eq!(
            format(&url, &Options::default().with(OptionName::Surt, false)),
            "http://user@example.com:8080/"
        );
    }

    #[test]
    fn test_query_without_path() {
        let mut url = host_url("example.com");
        url.path.clear();
        assert_eq!(format(&url, &Options::default()), "com,example)");

        url.query = Some(vec![QueryPair::from_token("a=1")]);
        assert_eq!(format(&url, &Options::default()), "com,example)/?a=1");
    }

    #[test]
    fn test_fragment_never_emitted() {
        let mut url = host_url("example.com");
        url.fragment = Some("top".to_string());
        assert_eq!(format(&url, &Options::default()), "com,example)/");
        assert_eq!(
            format(&url, &Options::default().with(OptionName::Surt, false)),
            "http://example.com/"
        );
    }
}
