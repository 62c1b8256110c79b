//! Lazy, globally indexed stream of documents across result pages.
//!
//! Pages are downloaded one at a time and only when the previous page has
//! been fully consumed, so dropping the stream stops all further requests.

use std::thread;
use std::time::Duration;

use url::Url;

use crate::case::tokenize_case;
use crate::error::{HarvesterError, ParseError, Result};
use crate::http::PageSource;
use crate::page::{split_cases, split_documents};
use crate::sequencer::{PageUrl, PageUrls};
use crate::stats::parse_page_stats;
use crate::types::{Case, Document, PageStats, Window};

/// Documents of a downloaded page that have not been handed out yet.
struct LoadedPage {
    url: String,
    /// `(title, body)` pairs, numbered from 1.
    documents: std::iter::Enumerate<std::vec::IntoIter<(String, String)>>,
}

impl LoadedPage {
    fn parse(url: String, html: &str) -> Result<Self> {
        let documents: Vec<(String, String)> = split_documents(html)
            .map_err(|e| HarvesterError::page(&url, e))?
            .into_iter()
            .map(|d| (d.title, d.body.to_string()))
            .collect();

        tracing::info!(url = %url, documents = documents.len(), "Processing page");
        Ok(Self {
            url,
            documents: documents.into_iter().enumerate(),
        })
    }
}

/// Split a document body into cases and tokenize each of them.
fn parse_document(body: &str) -> std::result::Result<Vec<Case>, ParseError> {
    split_cases(body)?.into_iter().map(tokenize_case).collect()
}

/// Iterator over all documents of a query, starting at the page that holds
/// the requested start index.
///
/// Yields `Err` at most once; the stream is exhausted afterwards.
pub struct DocumentStream<S> {
    source: S,
    pages: PageUrls,
    page_delay: Duration,
    sleep: Box<dyn FnMut(Duration)>,
    stats: PageStats,
    /// Global index of the last document handed out.
    counter: usize,
    /// First page, downloaded up front for the result totals.
    first: Option<(String, String)>,
    current: Option<LoadedPage>,
    done: bool,
}

impl<S: PageSource> DocumentStream<S> {
    /// Download the page holding document `start` and read the result totals.
    ///
    /// The first page is only parsed for documents once iteration starts.
    ///
    /// # Arguments
    /// * `source` - Where pages come from
    /// * `query` - Validated corpus query URL
    /// * `start` - 1-based index of the first document of interest
    /// * `page_delay` - Pause before every page download after the first
    pub fn open(source: S, query: Url, start: usize, page_delay: Duration) -> Result<Self> {
        Self::open_with_sleep(source, query, start, page_delay, thread::sleep)
    }

    /// Like [`DocumentStream::open`], pausing between pages with `sleep`.
    pub fn open_with_sleep(
        mut source: S,
        query: Url,
        start: usize,
        page_delay: Duration,
        sleep: impl FnMut(Duration) + 'static,
    ) -> Result<Self> {
        let mut pages = PageUrls::new(query, start);
        let PageUrl {
            url, first_index, ..
        } = pages
            .next()
            .ok_or_else(|| HarvesterError::InvalidArgument("no result pages".to_string()))?;

        let html = source.fetch_page(&url)?;
        let stats = parse_page_stats(&html);

        Ok(Self {
            source,
            pages,
            page_delay,
            sleep: Box::new(sleep),
            stats,
            counter: first_index - 1,
            first: Some((url, html)),
            current: None,
            done: stats.total_documents == 0,
        })
    }

    /// Result totals reported on the first page.
    pub fn stats(&self) -> PageStats {
        self.stats
    }

    /// Restrict the stream to the documents inside `window`.
    pub fn windowed(self, window: Window) -> Windowed<Self> {
        Windowed::new(self, window)
    }

    fn next_page(&mut self) -> Result<LoadedPage> {
        if let Some((url, html)) = self.first.take() {
            return LoadedPage::parse(url, &html);
        }

        // PageUrls never ends; the totals decide when to stop
        let Some(page) = self.pages.next() else {
            return Err(HarvesterError::InvalidArgument("no result pages".to_string()));
        };

        if !self.page_delay.is_zero() {
            tracing::debug!(delay_ms = self.page_delay.as_millis() as u64, "Pausing between pages");
            (self.sleep)(self.page_delay);
        }

        let html = self.source.fetch_page(&page.url)?;
        LoadedPage::parse(page.url, &html)
    }

    fn fail(&mut self, error: HarvesterError) -> Option<Result<Document>> {
        self.done = true;
        self.current = None;
        Some(Err(error))
    }
}

impl<S: PageSource> Iterator for DocumentStream<S> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(page) = self.current.as_mut() {
                if let Some((i, (title, body))) = page.documents.next() {
                    return match parse_document(&body) {
                        Ok(cases) => {
                            self.counter += 1;
                            Some(Ok(Document {
                                index: self.counter,
                                title,
                                cases,
                            }))
                        }
                        Err(e) => {
                            let error = HarvesterError::document(&page.url, i + 1, e);
                            self.fail(error)
                        }
                    };
                }

                // Page finished
                self.current = None;
                if self.counter >= self.stats.total_documents {
                    tracing::info!(documents = self.counter, "Reached the last document");
                    self.done = true;
                    return None;
                }
            }

            match self.next_page() {
                Ok(page) => self.current = Some(page),
                Err(e) => return self.fail(e),
            }
        }
    }
}

/// Iterator adapter passing through only documents inside a [`Window`].
///
/// Stops pulling from the inner iterator as soon as the last document of the
/// window has been yielded, so no page beyond it is downloaded.
pub struct Windowed<I> {
    inner: I,
    window: Window,
    done: bool,
}

impl<I> Windowed<I> {
    pub fn new(inner: I, window: Window) -> Self {
        Self {
            inner,
            window,
            done: window.count == Some(0),
        }
    }
}

impl<I: Iterator<Item = Result<Document>>> Iterator for Windowed<I> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.inner.next()? {
                Ok(document) if document.index < self.window.start => continue,
                Ok(document) if self.window.is_past(document.index) => self.done = true,
                Ok(document) => {
                    self.done = self.window.is_past(document.index + 1);
                    return Some(Ok(document));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
