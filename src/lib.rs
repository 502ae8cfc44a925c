//! SURT - Sort-friendly URL Reordering Transform
//!
//! A SURT is a canonical, lexicographically sortable rewriting of a URL used
//! by web archives to group and index captures by reversed host hierarchy:
//! `http://www.archive.org/` becomes `org,archive)/`.
//!
//! This crate turns URLs into SURT keys (or canonical URLs) through a fixed
//! pipeline of parsing, canonicalization and formatting, each stage
//! governed by a fully resolved set of boolean options.
//!
//! # Features
//!
//! - **Deterministic**: Same input and options always produce the same key
//! - **Sortable**: Host labels are reversed so related hosts sort together
//! - **Configurable**: Every canonicalization rule can be switched on or off
//! - **Stateless**: No shared mutable state; safe to call from any thread
//! - **Standards-aware**: IDNA hosts, legacy IPv4 spellings and the Public Suffix List
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use surt::generate_surt;
//!
//! // Default options
//! let key = generate_surt("http://www.archive.org/goo/?b&a", None)?;
//! assert_eq!(key, "org,archive)/goo?a&b");
//!
//! // Override a few options by name
//! let mut options = HashMap::new();
//! options.insert("with_scheme".to_string(), true);
//! options.insert("trailing_comma".to_string(), true);
//!
//! let key = generate_surt("http://www.example.com/", Some(&options))?;
//! assert_eq!(key, "http://(com,example,)/");
//! # Ok::<(), surt::SurtError>(())
//! ```
//!
//! # Pipeline
//!
//! | Stage            | Entry point        | Output                      |
//! |------------------|--------------------|-----------------------------|
//! | Option registry  | [`Options::resolve`] | every option with a value |
//! | Parser           | [`parse`]          | [`ParsedUrl`]               |
//! | Canonicalizer    | [`canonicalize`]   | [`ParsedUrl`]               |
//! | Formatter        | [`format`]         | SURT key or canonical URL   |
//!
//! The canonicalization rules run in the order of [`RULES`].
//!
//! # Opaque Schemes
//!
//! `dns:`, `mailto:`, `filedesc:` and `warcinfo:` URLs, and URLs without an
//! authority, are returned verbatim under every option combination.
//!
//! # Error Handling
//!
//! All fallible functions return `Result<T, SurtError>`. Common error cases:
//!
//! - Empty input
//! - Input without a `scheme:` prefix
//! - A missing host or an invalid port
//! - Percent-escapes that cannot be normalized

use std::collections::HashMap;

use tracing::debug;

/// Compute the SURT key for a URL with optional named option overrides.
///
/// Option names outside the registry are ignored. Missing names take their
/// documented defaults (see [`options`]).
///
/// # Arguments
///
/// * `url` - The URL to transform
/// * `options` - Optional mapping of option names to values
///
/// # Returns
///
/// Returns the SURT key (or, with `surt` disabled, the canonical URL), or an
/// error if the URL cannot be processed.
///
/// # Examples
///
/// ```
/// use surt::{generate_surt, SurtError};
///
/// assert_eq!(generate_surt("http://192.168.1.254/info/", None).unwrap(), "254,1,168,192)/info");
/// assert_eq!(generate_surt("dns:archive.org", None).unwrap(), "dns:archive.org");
/// assert_eq!(generate_surt("", None), Err(SurtError::EmptyUrl));
/// ```
pub fn generate_surt(url: &str, options: Option<&HashMap<String, bool>>) -> Result<String, SurtError> {
    surt(url, &Options::resolve(options))
}

/// Compute the SURT key for a URL with a resolved option set.
///
/// # Examples
///
/// ```
/// use surt::{surt, OptionName, Options};
///
/// let options = Options::default().with(OptionName::Surt, false);
/// assert_eq!(surt("http://WWW.Archive.org:80/", &options).unwrap(), "http://archive.org/");
/// ```
pub fn surt(url: &str, options: &Options) -> Result<String, SurtError> {
    // Step 1: Parse
    let parsed = parse(url).inspect_err(|err| debug!(%url, %err, "failed to parse url"))?;

    // Step 2: Canonicalize
    let canonical = canonicalize(parsed, options)
        .inspect_err(|err| debug!(%url, %err, "failed to canonicalize url"))?;

    // Step 3: Format
    let key = format(&canonical, options);

    debug!(%url, %key, "generated surt");
    Ok(key)
}

// Re-export the pipeline stages
pub use crate::core::{canonicalize, format, Rule, RULES};
pub use crate::url::parse;

// Re-export public types
pub use error::SurtError;
pub use options::{OptionName, Options, UnknownOption};
pub use types::{Authority, ParsedUrl, QueryPair};

// Module declarations
pub mod core;
pub mod error;
pub mod options;
pub mod types;
pub mod url;
