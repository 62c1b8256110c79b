//! Configuration constants and validation functions for the harvester.

use std::time::Duration;

use url::Url;

use crate::error::{HarvesterError, Result};

/// Host serving the corpus search interface.
pub const CORPUS_HOST: &str = "processing.ruscorpora.ru";

/// Path of the search endpoint on [`CORPUS_HOST`].
pub const CORPUS_PATH: &str = "/search.xml";

/// Documents requested per result page.
///
/// The search service silently ignores larger values, so this is fixed.
pub const DOCS_PER_PAGE: usize = 50;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Maximum number of attempts for a single page download.
pub const MAX_FETCH_ATTEMPTS: u32 = 10;

/// Pause between two attempts at downloading the same page.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Pause between downloads of two different pages.
///
/// Keeps the harvester from hammering the corpus server.
pub const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Retry and pacing settings for page downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Attempts per page before giving up.
    pub max_attempts: u32,
    /// Sleep between failed attempts.
    pub retry_delay: Duration,
    /// Sleep before each page download except the first one.
    pub page_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_FETCH_ATTEMPTS,
            retry_delay: RETRY_DELAY,
            page_delay: PAGE_DELAY,
        }
    }
}

/// Validate a corpus query URL.
///
/// Only the scheme, host and path are checked; the query parameters are
/// passed through to the corpus untouched.
///
/// # Arguments
/// * `query` - The search URL as copied from the browser
///
/// # Returns
/// * `Ok(Url)` with the parsed URL if valid
/// * `Err(HarvesterError::InvalidQueryUrl)` otherwise
///
/// # Examples
/// ```
/// use ruscorpora_harvester::config::validate_query_url;
///
/// assert!(validate_query_url("https://processing.ruscorpora.ru/search.xml?req=dom").is_ok());
/// assert!(validate_query_url("https://example.com/search.xml?req=dom").is_err());
/// assert!(validate_query_url("ftp://processing.ruscorpora.ru/search.xml").is_err());
/// ```
pub fn validate_query_url(query: &str) -> Result<Url> {
    let invalid = || HarvesterError::InvalidQueryUrl(query.to_string());

    let url = Url::parse(query).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }

    // Anything besides the bare host (credentials, explicit port) is rejected
    if url.host_str() != Some(CORPUS_HOST)
        || url.port().is_some()
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return Err(invalid());
    }

    if url.path() != CORPUS_PATH {
        return Err(invalid());
    }

    Ok(url)
}
