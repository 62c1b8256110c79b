//! Extraction of result totals from the first result page.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::PageStats;

/// Statistics marker, e.g. `<span class="stat-number">1 234 документа</span>`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STAT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="stat-number">([\w\s]+)</span>"#).expect("valid regex")
});

/// Label stem for document counts ("документ", "документа", "документов").
const DOCUMENTS_STEM: &str = "документ";

/// Label stem for occurrence counts ("вхождение", "вхождения", "вхождений").
const CASES_STEM: &str = "вхождени";

/// Read total document and case counts from a result page.
///
/// Missing or unreadable markers leave the corresponding total at zero.
///
/// # Examples
/// ```
/// use ruscorpora_harvester::stats::parse_page_stats;
///
/// let html = r#"<span class="stat-number">1 204 документа</span>
/// <span class="stat-number">3 517 вхождений</span>"#;
/// let stats = parse_page_stats(html);
/// assert_eq!(stats.total_documents, 1204);
/// assert_eq!(stats.total_cases, 3517);
/// ```
pub fn parse_page_stats(html: &str) -> PageStats {
    let mut stats = PageStats::default();

    for caps in STAT_NUMBER.captures_iter(html) {
        let Some((number, label)) = caps[1].trim().rsplit_once(' ') else {
            continue;
        };

        let target = if label.starts_with(DOCUMENTS_STEM) {
            &mut stats.total_documents
        } else if label.starts_with(CASES_STEM) {
            &mut stats.total_cases
        } else {
            continue;
        };

        let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        match digits.parse() {
            Ok(value) => *target = value,
            Err(_) => tracing::warn!(number, label, "Unreadable statistics number"),
        }
    }

    tracing::info!(
        documents = stats.total_documents,
        cases = stats.total_cases,
        "Read result totals"
    );
    stats
}
