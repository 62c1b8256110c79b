//! Main harvester service that ties all components together.

use std::io::Write;
use std::time::Duration;

use crate::config::{validate_query_url, FetchPolicy};
use crate::error::{HarvesterError, Result};
use crate::http::{HttpFetcher, PageSource};
use crate::output::RecordWriter;
use crate::stream::DocumentStream;
use crate::types::{Document, PageStats, Window};

/// What a harvest wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Totals reported by the corpus.
    pub stats: PageStats,

    /// Documents written (inside the window).
    pub documents: usize,

    /// Case lines written.
    pub cases: usize,
}

/// Download the examples of a corpus query and write them to `out`.
///
/// Uses the default retry and pacing policy.
///
/// # Arguments
/// * `query` - Corpus search URL
/// * `window` - Documents to write
/// * `out` - Destination of the record stream
/// * `progress` - Called for every document written
pub fn download_examples<W: Write>(
    query: &str,
    window: Window,
    out: W,
    progress: impl FnMut(&Document),
) -> Result<HarvestSummary> {
    // Fail on a bad query before building the HTTP client
    validate_query_url(query)?;

    let policy = FetchPolicy::default();
    let fetcher = HttpFetcher::new(policy)?;
    harvest(fetcher, query, window, policy.page_delay, out, progress)
}

/// Harvest a corpus query from `source` and write the records to `out`.
///
/// The query is validated before anything is fetched or written. Records
/// already written stay in `out` when a later page fails; `window.start`
/// can be used to resume such a run.
///
/// # Arguments
/// * `source` - Where result pages come from
/// * `query` - Corpus search URL
/// * `window` - Documents to write
/// * `page_delay` - Pause between two page downloads
/// * `out` - Destination of the record stream
/// * `progress` - Called for every document written
pub fn harvest<S: PageSource, W: Write>(
    source: S,
    query: &str,
    window: Window,
    page_delay: Duration,
    out: W,
    mut progress: impl FnMut(&Document),
) -> Result<HarvestSummary> {
    let url = validate_query_url(query)?;
    if window.start == 0 {
        return Err(HarvesterError::InvalidArgument(
            "start index must be at least 1".to_string(),
        ));
    }

    let stream = DocumentStream::open(source, url, window.start, page_delay)?;
    let stats = stream.stats();

    let mut writer = RecordWriter::new(out);
    writer.write_header(query, &stats)?;

    let mut summary = HarvestSummary {
        stats,
        ..HarvestSummary::default()
    };

    for document in stream.windowed(window) {
        let document = match document {
            Ok(document) => document,
            Err(e) => {
                writer.flush()?;
                return Err(e);
            }
        };
        summary.cases += writer.write_document(&document)?;
        summary.documents += 1;
        progress(&document);
    }

    writer.flush()?;
    tracing::info!(
        documents = summary.documents,
        cases = summary.cases,
        "Harvest finished"
    );
    Ok(summary)
}
