//! Result page URL generation.
//!
//! The corpus pages its results with two query parameters: `dpp` (documents
//! per page) and `p` (0-based page number). Given the first document the
//! caller is interested in, [`PageUrls`] yields the URL of the page holding
//! it and of every page after it.

use url::Url;

use crate::config::DOCS_PER_PAGE;

/// A result page to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    /// 0-based page number (`p` parameter).
    pub page: usize,

    /// Global index of the first document on this page.
    pub first_index: usize,

    pub url: String,
}

/// 0-based number of the page holding document `start` (1-based).
#[must_use]
pub fn page_of(start: usize) -> usize {
    start.saturating_sub(1) / DOCS_PER_PAGE
}

/// Global index of the first document on the page holding document `start`.
///
/// # Examples
/// ```
/// use ruscorpora_harvester::sequencer::first_index_on_page;
///
/// assert_eq!(first_index_on_page(1), 1);
/// assert_eq!(first_index_on_page(50), 1);
/// assert_eq!(first_index_on_page(51), 51);
/// assert_eq!(first_index_on_page(60), 51);
/// ```
#[must_use]
pub fn first_index_on_page(start: usize) -> usize {
    page_of(start) * DOCS_PER_PAGE + 1
}

/// Endless iterator over result page URLs.
#[derive(Debug, Clone)]
pub struct PageUrls {
    base: Url,
    page: usize,
}

impl PageUrls {
    /// Start at the page holding document `start`.
    pub fn new(base: Url, start: usize) -> Self {
        Self {
            base,
            page: page_of(start),
        }
    }

    fn url_for(&self, page: usize) -> String {
        let dpp = DOCS_PER_PAGE.to_string();
        let p = page.to_string();

        let mut pairs: Vec<(String, String)> = Vec::new();
        let (mut has_dpp, mut has_p) = (false, false);
        for (key, value) in self.base.query_pairs() {
            let value = match key.as_ref() {
                "dpp" if has_dpp => continue,
                "p" if has_p => continue,
                "dpp" => {
                    has_dpp = true;
                    dpp.clone()
                }
                "p" => {
                    has_p = true;
                    p.clone()
                }
                _ => value.into_owned(),
            };
            pairs.push((key.into_owned(), value));
        }
        if !has_dpp {
            pairs.push(("dpp".to_string(), dpp));
        }
        if !has_p {
            pairs.push(("p".to_string(), p));
        }

        let mut url = self.base.clone();
        url.set_fragment(None);
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.into()
    }
}

impl Iterator for PageUrls {
    type Item = PageUrl;

    fn next(&mut self) -> Option<PageUrl> {
        let page = self.page;
        self.page += 1;
        Some(PageUrl {
            page,
            first_index: page * DOCS_PER_PAGE + 1,
            url: self.url_for(page),
        })
    }
}
