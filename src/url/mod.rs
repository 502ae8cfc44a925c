//! URL parsing and baseline normalization.
//!
//! This module contains the URL-level functionality:
//! - Decomposing a raw string into a [`ParsedUrl`](crate::types::ParsedUrl)
//! - Percent-escape normalization
//! - Host decoding, IDNA conversion and IPv4 coercion
//! - Public Suffix List (PSL) registrable-domain lookup

pub mod escape;
pub mod normalizer;
pub mod parser;
pub mod psl;

// Re-export main functionality
pub use escape::normalize_escapes;
pub use normalizer::{coerce_ipv4, normalize_host, normalize_path};
pub use parser::parse;
pub use psl::registrable_domain;
