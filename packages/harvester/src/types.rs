//! Core data types for the harvester.

/// Totals reported by the corpus on the first result page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    /// Number of documents matching the query.
    pub total_documents: usize,

    /// Number of occurrences (cases) matching the query.
    pub total_cases: usize,
}

/// A run of case text, either plain or highlighted by the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// One example occurrence inside a document.
///
/// Segments alternate plain / highlighted, starting and ending with a plain
/// segment, so there is always an odd number of them and at least one
/// highlighted segment. Plain segments may be empty, highlighted ones never are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    segments: Vec<Segment>,
}

impl Case {
    /// Build a case from the texts of alternating plain / highlighted segments.
    ///
    /// Returns `None` if the number of texts is even or smaller than three, or
    /// if a highlighted text is empty.
    pub fn from_texts(texts: Vec<String>) -> Option<Self> {
        if texts.len() < 3 || texts.len() % 2 == 0 {
            return None;
        }
        if texts.iter().skip(1).step_by(2).any(String::is_empty) {
            return None;
        }
        let segments = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Segment {
                text,
                highlighted: i % 2 == 1,
            })
            .collect();
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Highlighted segments only.
    pub fn highlighted(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
    }

    /// Full text of the case.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A corpus document with its cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// 1-based position of the document in the whole result set.
    pub index: usize,

    /// Document title as shown on the result page.
    pub title: String,

    pub cases: Vec<Case>,
}

/// Range of document indices to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First document index to emit (1-based).
    pub start: usize,

    /// Number of documents to emit, `None` for all remaining.
    pub count: Option<usize>,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            start: 1,
            count: None,
        }
    }
}

impl Window {
    pub fn new(start: usize, count: Option<usize>) -> Self {
        Self { start, count }
    }

    /// Whether a document index falls inside the window.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && !self.is_past(index)
    }

    /// Whether an index lies beyond the end of the window.
    #[must_use]
    pub fn is_past(&self, index: usize) -> bool {
        match self.count {
            Some(count) => index >= self.start.saturating_add(count),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_from_texts() {
        let case = Case::from_texts(texts(&["A ", "X", " B"])).unwrap();
        assert_eq!(
            case.segments(),
            &[
                Segment::plain("A "),
                Segment::highlighted("X"),
                Segment::plain(" B")
            ]
        );
        assert_eq!(case.text(), "A X B");
        assert_eq!(case.highlighted().collect::<Vec<_>>(), vec!["X"]);
    }

    #[test]
    fn test_case_from_texts_rejects_bad_lengths() {
        assert!(Case::from_texts(texts(&[])).is_none());
        assert!(Case::from_texts(texts(&["only"])).is_none());
        assert!(Case::from_texts(texts(&["a", "b"])).is_none());
        assert!(Case::from_texts(texts(&["a", "b", "c", "d"])).is_none());
    }

    #[test]
    fn test_case_from_texts_rejects_empty_highlight() {
        assert!(Case::from_texts(texts(&["a", "", "b"])).is_none());
        assert!(Case::from_texts(texts(&["a", "X", "", "", "b"])).is_none());
        assert!(Case::from_texts(texts(&["", "X", "", "Y", ""])).is_some());
    }

    #[test]
    fn test_window_unbounded() {
        let window = Window::default();
        assert!(!window.contains(0));
        assert!(window.contains(1));
        assert!(window.contains(1_000_000));
        assert!(!window.is_past(usize::MAX));
    }

    #[test]
    fn test_window_bounded() {
        let window = Window::new(60, Some(5));
        assert!(!window.contains(59));
        assert!(window.contains(60));
        assert!(window.contains(64));
        assert!(!window.contains(65));
        assert!(window.is_past(65));
        assert!(!window.is_past(64));
    }

    #[test]
    fn test_window_empty() {
        let window = Window::new(1, Some(0));
        assert!(!window.contains(1));
        assert!(window.is_past(1));
    }
}
