//! Pattern matching for session identifiers and IP-address hosts.
//!
//! Session identifiers embedded by application servers make otherwise equal
//! URLs sort apart. The matchers here recognize the common ASP.NET, Java,
//! PHP and ColdFusion forms so the canonicalizer can drop them.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::QueryPair;

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static PATH_SESSION_MULTI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\((?:[a-z]\([0-9a-z]{24}\))+\)$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static PATH_SESSION_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\([0-9a-z]{24}\)$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static SESSION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:jsessionid|phpsessid|sid)$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static SESSION_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-zA-Z]{32}$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static ASP_SESSION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^aspsessionid[a-z]{8}$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static ASP_SESSION_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]{24}$").expect("static regex should not panic")
});
#[allow(clippy::expect_used)] // good regex, it doesn't panic
static IPV4_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{1,3}\.){3}\d{1,3}$").expect("static regex should not panic")
});

/// Whether a path segment is an ASP.NET cookieless session token, such as
/// `(S(4hqa0555fwsecu455xqckv45))` or `(4hqa0555fwsecu455xqckv45)`.
pub fn is_path_session_segment(segment: &str) -> bool {
    PATH_SESSION_MULTI.is_match(segment) || PATH_SESSION_SINGLE.is_match(segment)
}

/// Remove session-token segments that precede an `.aspx` page.
///
/// A token segment is only removed when a later segment names an `.aspx`
/// resource; the same shape elsewhere is left alone.
pub fn strip_path_session_ids(path: &mut Vec<String>) {
    let mut index = 0;
    while index < path.len() {
        let before_aspx = path[index + 1..]
            .iter()
            .any(|segment| segment.to_ascii_lowercase().contains(".aspx"));

        if before_aspx && is_path_session_segment(&path[index]) {
            path.remove(index);
        } else {
            index += 1;
        }
    }
}

/// Whether a single query pair carries a Java, PHP or ASP session id.
///
/// # Examples
///
/// ```
/// use surt::core::matcher::is_query_session_pair;
/// use surt::QueryPair;
///
/// let pair = QueryPair::from_token("PHPSESSID=0123456789abcdefghijklemopqrstuv");
/// assert!(is_query_session_pair(&pair));
///
/// let pair = QueryPair::from_token("sid=too-short");
/// assert!(!is_query_session_pair(&pair));
/// ```
pub fn is_query_session_pair(pair: &QueryPair) -> bool {
    let Some(value) = pair.value.as_deref() else {
        return false;
    };

    (SESSION_KEY.is_match(&pair.key) && SESSION_VALUE.is_match(value))
        || (ASP_SESSION_KEY.is_match(&pair.key) && ASP_SESSION_VALUE.is_match(value))
}

fn has_key_and_value(pair: &QueryPair, key: &str) -> bool {
    pair.key.eq_ignore_ascii_case(key) && pair.value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Remove session-id pairs from a query, including ColdFusion `CFID`
/// pairs that are immediately followed by a `CFTOKEN` pair.
///
/// Removing the final pair keeps the `&` that preceded it, as an empty
/// pair: `one=two&jsessionid=...` becomes `one=two&`. Existing archive
/// indexes carry keys built this way.
pub fn strip_query_session_ids(pairs: &mut Vec<QueryPair>) {
    let mut kept = Vec::with_capacity(pairs.len());
    let mut iter = std::mem::take(pairs).into_iter().peekable();
    let mut removed_last = false;

    while let Some(pair) = iter.next() {
        if is_query_session_pair(&pair) {
            removed_last = true;
            continue;
        }

        if has_key_and_value(&pair, "cfid")
            && iter.peek().is_some_and(|next| has_key_and_value(next, "cftoken"))
        {
            iter.next();
            removed_last = true;
            continue;
        }

        kept.push(pair);
        removed_last = false;
    }

    if removed_last && !kept.is_empty() {
        kept.push(QueryPair::new("", None));
    }

    *pairs = kept;
}

/// Whether a host ends in a dotted-quad IPv4 address.
///
/// Only the end is anchored, so `foo.1.2.3.4` also counts and is kept in
/// its written order when IP reversal is off.
pub fn is_ipv4_host(host: &str) -> bool {
    IPV4_HOST.is_match(host)
}
