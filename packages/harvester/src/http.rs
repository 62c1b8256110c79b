//! HTTP client wrapper for downloading corpus result pages.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{FetchPolicy, HTTP_TIMEOUT_SECS};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("ruscorpora-harvester/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce the raw markup of a result page.
///
/// The document stream only depends on this trait, so pages can come from
/// the network or from memory.
pub trait PageSource {
    /// Return the markup at `url`, or fail with `HarvesterError::Fetch`.
    fn fetch_page(&mut self, url: &str) -> Result<String>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, url: &str) -> Result<String> {
        (**self).fetch_page(url)
    }
}

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Run `attempt` until it succeeds or `policy.max_attempts` is used up.
///
/// `sleep` is called with `policy.retry_delay` after every failed attempt
/// that is followed by another one, so `k` failures before a success
/// mean exactly `k` sleeps.
///
/// # Arguments
/// * `url` - Page URL, used for logging and the final error
/// * `policy` - Attempt limit and retry delay
/// * `sleep` - Sleep implementation (`std::thread::sleep` outside tests)
/// * `attempt` - One download attempt, failing with a human readable message
pub fn fetch_with_retries(
    url: &str,
    policy: &FetchPolicy,
    mut sleep: impl FnMut(Duration),
    mut attempt: impl FnMut() -> std::result::Result<String, String>,
) -> Result<String> {
    let mut last_error = None;

    for n in 1..=policy.max_attempts {
        tracing::info!(url, attempt = n, "Downloading page");
        match attempt() {
            Ok(body) => return Ok(body),
            Err(message) => {
                tracing::warn!(
                    url,
                    attempt = n,
                    max_attempts = policy.max_attempts,
                    error = %message,
                    "Download failed"
                );
                last_error = Some(message);
                if n < policy.max_attempts {
                    sleep(policy.retry_delay);
                }
            }
        }
    }

    Err(HarvesterError::Fetch {
        url: url.to_string(),
        attempts: policy.max_attempts,
        message: last_error.unwrap_or_else(|| "no attempts made".to_string()),
    })
}

/// Page source backed by a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: FetchPolicy,
}

impl HttpFetcher {
    /// Create a fetcher with a freshly configured client.
    pub fn new(policy: FetchPolicy) -> Result<Self> {
        Ok(Self::with_client(create_client()?, policy))
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, policy: FetchPolicy) -> Self {
        Self { client, policy }
    }

    /// One download attempt. Any transport error or non-success status fails.
    fn download_once(&self, url: &str) -> std::result::Result<String, String> {
        let response = self.client.get(url).send().map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Server returned {status}"));
        }

        response.text().map_err(|e| e.to_string())
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&mut self, url: &str) -> Result<String> {
        fetch_with_retries(url, &self.policy, thread::sleep, || self.download_once(url))
    }
}
