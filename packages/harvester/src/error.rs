//! Error types for the harvester.
//!
//! `HarvesterError` is what library consumers see. Markup problems are
//! described by the closed `ParseError` set and always travel wrapped in
//! `HarvesterError::Parse` together with the page URL they came from.

use thiserror::Error;

/// Ways in which a result page can fail to match the expected markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The page has no document title markers.
    #[error("no documents on the page")]
    NoDocuments,

    /// A document has no case end markers.
    #[error("no cases in the document")]
    NoCases,

    /// A case fragment has no word spans.
    #[error("no words in the case")]
    NoWordSpans,

    /// A case fragment has word spans, but none of them is highlighted.
    #[error("no highlighted words in the case")]
    NoHighlightedWord,
}

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Query URL is not a corpus search URL.
    #[error("Invalid query URL: '{0}'. Expected http(s)://processing.ruscorpora.ru/search.xml?<query>")]
    InvalidQueryUrl(String),

    /// Invalid command-line or library argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP client could not be set up.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A page could not be downloaded within the allowed number of attempts.
    #[error("Failed to download {url} after {attempts} attempts: {message}")]
    Fetch {
        url: String,
        attempts: u32,
        message: String,
    },

    /// A page did not match the expected markup.
    #[error("Failed to process page {url}{}: {source}", .document.map(|d| format!(", document {d}")).unwrap_or_default())]
    Parse {
        url: String,
        /// 1-based position of the offending document on the page.
        document: Option<usize>,
        #[source]
        source: ParseError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvesterError {
    /// Wrap a page-level parse failure with the page URL.
    pub fn page(url: &str, source: ParseError) -> Self {
        Self::Parse {
            url: url.to_string(),
            document: None,
            source,
        }
    }

    /// Wrap a document-level parse failure with the page URL and position.
    pub fn document(url: &str, document: usize, source: ParseError) -> Self {
        Self::Parse {
            url: url.to_string(),
            document: Some(document),
            source,
        }
    }

    /// Whether the failure came from the network rather than the markup.
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Http(_))
    }

    /// Whether the failure came from unexpected page markup.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarvesterError::InvalidQueryUrl("https://example.com".to_string());
        assert!(err.to_string().contains("https://example.com"));
        assert!(err.to_string().contains("processing.ruscorpora.ru"));
    }

    #[test]
    fn test_parse_error_with_document() {
        let err = HarvesterError::document("https://x/search.xml?p=1", 3, ParseError::NoCases);
        assert_eq!(
            err.to_string(),
            "Failed to process page https://x/search.xml?p=1, document 3: no cases in the document"
        );
        assert!(err.is_parse());
        assert!(!err.is_fetch());
    }

    #[test]
    fn test_parse_error_without_document() {
        let err = HarvesterError::page("https://x/search.xml?p=0", ParseError::NoDocuments);
        assert_eq!(
            err.to_string(),
            "Failed to process page https://x/search.xml?p=0: no documents on the page"
        );
    }

    #[test]
    fn test_fetch_error() {
        let err = HarvesterError::Fetch {
            url: "https://x".to_string(),
            attempts: 10,
            message: "Server error: 503".to_string(),
        };
        assert!(err.is_fetch());
        assert!(err.to_string().contains("after 10 attempts"));
    }
}
