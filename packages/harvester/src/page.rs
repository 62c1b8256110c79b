//! Splitting result pages into documents and documents into cases.
//!
//! A result page lists documents one after another. Each document starts
//! with a title marker and is followed by its cases, each case closed by a
//! `<span class="doc">` source reference.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::text::normalize_whitespace;

/// Document title marker; group 1 is the title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOC_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span\s+class="b\-doc\-expl"\s*explain="[\w=]+">\s*(.*?)\s*</span>"#)
        .expect("valid regex")
});

/// Source reference closing each case.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CASE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span\s+class="doc">.*?</span>"#).expect("valid regex"));

/// One document's slice of a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMarkup<'a> {
    /// Whitespace-normalized title.
    pub title: String,

    /// Markup between this document's title marker and the next one.
    pub body: &'a str,
}

/// Split a result page into documents, in page order.
///
/// # Errors
/// `ParseError::NoDocuments` if the page has no title markers.
pub fn split_documents(html: &str) -> Result<Vec<DocumentMarkup<'_>>, ParseError> {
    let titles: Vec<_> = DOC_TITLE
        .captures_iter(html)
        .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?.as_str())))
        .collect();

    if titles.is_empty() {
        return Err(ParseError::NoDocuments);
    }

    let documents = titles
        .iter()
        .enumerate()
        .map(|(i, (marker, title))| {
            let end = titles
                .get(i + 1)
                .map_or(html.len(), |(next, _)| next.start());
            DocumentMarkup {
                title: normalize_whitespace(title),
                body: &html[marker.end()..end],
            }
        })
        .collect();

    Ok(documents)
}

/// Split a document into case fragments, in order.
///
/// Whatever follows the last case end marker belongs to the page layout and
/// is dropped.
///
/// # Errors
/// `ParseError::NoCases` if the document has no case end markers.
pub fn split_cases(body: &str) -> Result<Vec<&str>, ParseError> {
    let mut fragments: Vec<&str> = CASE_END.split(body).collect();
    // split always yields one more piece than there are markers
    fragments.pop();

    if fragments.is_empty() {
        return Err(ParseError::NoCases);
    }
    Ok(fragments)
}
