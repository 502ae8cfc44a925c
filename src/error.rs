//! Error types for SURT generation.

use thiserror::Error;

/// Errors that can occur while parsing, canonicalizing or formatting a URL.
///
/// Every failure is terminal for the call that produced it: no partial key is
/// ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurtError {
    /// The input was empty (or contained only whitespace).
    #[error("URL is empty")]
    EmptyUrl,

    /// The URL has a scheme but its authority, host or port is malformed.
    #[error("URL parsing failed: {0}")]
    UrlParseError(String),

    /// The input has no `scheme:` prefix.
    #[error("No scheme found: expected the URL to start with `scheme:`")]
    NoSchemeFound,

    /// A component could not be normalized.
    #[error("Canonicalization failed: {0}")]
    CanonicalizerError(String),
}

impl SurtError {
    /// Stable name of the error variant, as surfaced to binding layers.
    pub fn kind(&self) -> &'static str {
        match self {
            SurtError::EmptyUrl => "EmptyUrl",
            SurtError::UrlParseError(_) => "UrlParseError",
            SurtError::NoSchemeFound => "NoSchemeFound",
            SurtError::CanonicalizerError(_) => "CanonicalizerError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SurtError::EmptyUrl.to_string(), "URL is empty");
        assert_eq!(
            SurtError::UrlParseError("invalid port `x`".to_string()).to_string(),
            "URL parsing failed: invalid port `x`"
        );
        assert_eq!(
            SurtError::NoSchemeFound.to_string(),
            "No scheme found: expected the URL to start with `scheme:`"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(SurtError::EmptyUrl, SurtError::EmptyUrl);
        assert_ne!(SurtError::EmptyUrl, SurtError::NoSchemeFound);
        assert_ne!(
            SurtError::UrlParseError("a".to_string()),
            SurtError::UrlParseError("b".to_string())
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(SurtError::EmptyUrl.kind(), "EmptyUrl");
        assert_eq!(SurtError::UrlParseError(String::new()).kind(), "UrlParseError");
        assert_eq!(SurtError::NoSchemeFound.kind(), "NoSchemeFound");
        assert_eq!(
            SurtError::CanonicalizerError(String::new()).kind(),
            "CanonicalizerError"
        );
    }
}
