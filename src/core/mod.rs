//! Core SURT canonicalization and formatting functionality.
//!
//! This module contains the pipeline stages that follow parsing:
//! - The ordered canonicalization rules
//! - Session-id and IP-address matching
//! - Serialization to a SURT key or a canonical URL

pub mod canonicalizer;
pub mod formatter;
pub mod matcher;

// Re-export main functionality
pub use canonicalizer::{canonicalize, Rule, RULES};
pub use formatter::{format, host_key};
pub use matcher::{is_query_session_pair, strip_path_session_ids, strip_query_session_ids};
