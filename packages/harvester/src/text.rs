//! Text normalization for values written to the record stream.

use regex::Regex;
use std::sync::LazyLock;

/// Any run of whitespace or control characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{Cc}]+").expect("valid regex"));

/// Collapse every run of whitespace and control characters to one ASCII space.
///
/// Tabs and newlines would break the tab-separated output, so they never
/// survive. Applying this twice gives the same result as applying it once.
///
/// # Examples
/// ```
/// use ruscorpora_harvester::text::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("a\t\n b\u{a0}c"), "a b c");
/// assert_eq!(normalize_whitespace("  "), " ");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    SPACE_RUN.replace_all(text, " ").into_owned()
}
