//! Tokenizing a case fragment into plain and highlighted segments.
//!
//! Every word of a case is wrapped in a `b-wrd-expl` span. Words matching the
//! query carry an extra `g-em` class. The text between word spans
//! (punctuation, spaces) is kept verbatim, so joining the segments gives back
//! the case text as shown on the page.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ParseError;
use crate::text::normalize_whitespace;
use crate::types::Case;

/// Word span; group 1 is the class suffix after `b-wrd-expl`, group 2 the word.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span\s+class="b\-wrd\-expl([\s\w-]+)?"\s*explain="[\w=]+"\s*>(.*?)</span>"#)
        .expect("valid regex")
});

/// Class suffix of a word that matched the query, as the last class.
const HIGHLIGHT_LAST: &str = " g-em";

/// Class suffix of a word that matched the query, followed by more classes.
const HIGHLIGHT_INNER: &str = " g-em ";

/// A word span found in a case fragment.
#[derive(Debug)]
struct WordSpan<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    highlighted: bool,
}

/// Whether the class suffix of a word span marks it as highlighted.
///
/// The suffix always follows `b-wrd-expl`, so the highlight class is only
/// recognized as a separate, space-delimited token.
fn is_highlighted(class_suffix: Option<&str>) -> bool {
    class_suffix.is_some_and(|s| s.ends_with(HIGHLIGHT_LAST) || s.contains(HIGHLIGHT_INNER))
}

/// Word spans in document order. A highlighted span with no text counts as a
/// plain word.
fn find_words(fragment: &str) -> Vec<WordSpan<'_>> {
    WORD.captures_iter(fragment)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = caps.get(2)?.as_str();
            Some(WordSpan {
                start: whole.start(),
                end: whole.end(),
                text,
                highlighted: !text.is_empty()
                    && is_highlighted(caps.get(1).map(|m| m.as_str())),
            })
        })
        .collect()
}

/// Turn one case fragment into a [`Case`].
///
/// # Errors
/// * `ParseError::NoWordSpans` if the fragment has no word spans
/// * `ParseError::NoHighlightedWord` if none of the words is highlighted
///
/// # Examples
/// ```
/// use ruscorpora_harvester::case::tokenize_case;
///
/// let html = concat!(
///     r#"<li>Я <span class="b-wrd-expl g-em" explain="eA==">видел</span> "#,
///     r#"<span class="b-wrd-expl" explain="eA==">дом</span>.</li>"#,
/// );
/// let case = tokenize_case(html).unwrap();
/// assert_eq!(case.text(), "Я видел дом.");
/// assert_eq!(case.highlighted().collect::<Vec<_>>(), vec!["видел"]);
/// ```
pub fn tokenize_case(fragment: &str) -> Result<Case, ParseError> {
    let words = find_words(fragment);

    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return Err(ParseError::NoWordSpans);
    };
    if !words.iter().any(|w| w.highlighted) {
        return Err(ParseError::NoHighlightedWord);
    }

    let mut texts = vec![String::new()];
    for (i, word) in words.iter().enumerate() {
        if word.highlighted {
            texts.push(word.text.to_string());
            texts.push(String::new());
        } else if let Some(current) = texts.last_mut() {
            current.push_str(word.text);
        }

        // Text up to the next word; after the last word it is handled below
        if let Some(next) = words.get(i + 1) {
            if let Some(current) = texts.last_mut() {
                current.push_str(&fragment[word.end..next.start]);
            }
        }
    }

    // Text before the first word, back to the closest tag
    let before = &fragment[..first.start];
    let before = before.rsplit('>').next().unwrap_or_default().trim_start();
    texts[0].insert_str(0, before);

    // Text after the last word, up to the closest tag
    let after = &fragment[last.end..];
    let after = after.split('<').next().unwrap_or_default().trim_end();
    if let Some(current) = texts.last_mut() {
        current.push_str(after);
    }

    let texts = texts.iter().map(|t| normalize_whitespace(t)).collect();
    // At least one highlighted word, so the alternation is always complete
    Case::from_texts(texts).ok_or(ParseError::NoHighlightedWord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use pretty_assertions::assert_eq;

    fn word(text: &str) -> String {
        format!(r#"<span class="b-wrd-expl" explain="dz0x">{text}</span>"#)
    }

    fn hit(text: &str) -> String {
        format!(r#"<span class="b-wrd-expl g-em" explain="dz0x">{text}</span>"#)
    }

    fn texts(case: &Case) -> Vec<&str> {
        case.segments().iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_is_highlighted() {
        assert!(is_highlighted(Some(" g-em")));
        assert!(is_highlighted(Some(" g-em other")));
        assert!(is_highlighted(Some(" some g-em")));
        assert!(!is_highlighted(Some(" g-emph")));
        assert!(!is_highlighted(Some("g-em")));
        assert!(!is_highlighted(Some(" xg-em")));
        assert!(!is_highlighted(None));
    }

    #[test]
    fn test_single_highlighted_word() {
        let html = format!("<li>A {} B</li>", hit("X"));
        let case = tokenize_case(&html).unwrap();
        assert_eq!(
            case.segments(),
            &[
                Segment::plain("A "),
                Segment::highlighted("X"),
                Segment::plain(" B"),
            ]
        );
    }

    #[test]
    fn test_plain_words_join_surrounding_text() {
        let html = format!(
            "<td>{}, {} {}!</td>",
            word("Ну"),
            word("вот"),
            hit("дом")
        );
        let case = tokenize_case(&html).unwrap();
        assert_eq!(texts(&case), vec!["Ну, вот ", "дом", "!"]);
    }

    #[test]
    fn test_adjacent_highlighted_words() {
        let html = format!("{}{}", hit("X"), hit("Y"));
        let case = tokenize_case(&html).unwrap();
        assert_eq!(texts(&case), vec!["", "X", "", "Y", ""]);
        assert_eq!(case.segments().len(), 5);
    }

    #[test]
    fn test_whitespace_normalized() {
        let html = format!(
            "<li>\n  Он\t{}\n\n{}\u{a0} ушёл  </li>",
            hit("быстро"),
            word("не")
        );
        let case = tokenize_case(&html).unwrap();
        assert_eq!(texts(&case), vec!["Он ", "быстро", " не ушёл"]);
    }

    #[test]
    fn test_outer_text_stops_at_tags() {
        let html = format!("<b>chrome</b> lead {} trail<i>chrome</i>", hit("X"));
        let case = tokenize_case(&html).unwrap();
        assert_eq!(texts(&case), vec!["lead ", "X", " trail"]);
    }

    #[test]
    fn test_segments_alternate() {
        let html = format!(
            "a {} b {} {} c {} d",
            hit("1"),
            word("w"),
            hit("2"),
            hit("3")
        );
        let case = tokenize_case(&html).unwrap();
        let segments = case.segments();
        assert_eq!(segments.len() % 2, 1);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.highlighted, i % 2 == 1);
            if segment.highlighted {
                assert!(!segment.text.is_empty());
            }
        }
        assert_eq!(texts(&case), vec!["a ", "1", " b w ", "2", " c ", "3", " d"]);
    }

    #[test]
    fn test_round_trip_text() {
        let html = format!(
            "<li>  Мы  {} по {}, {} домой.</li>",
            word("шли"),
            hit("берегу"),
            word("потом")
        );
        let case = tokenize_case(&html).unwrap();
        assert_eq!(case.text(), "Мы шли по берегу, потом домой.");
    }

    #[test]
    fn test_empty_highlighted_span_is_plain() {
        let html = format!(
            r#"a <span class="b-wrd-expl g-em" explain="x"></span> b {} c"#,
            hit("X")
        );
        let case = tokenize_case(&html).unwrap();
        assert_eq!(texts(&case), vec!["a b ", "X", " c"]);
    }

    #[test]
    fn test_only_empty_highlighted_span() {
        let html = r#"a <span class="b-wrd-expl g-em" explain="x"></span> b"#;
        assert_eq!(tokenize_case(html), Err(ParseError::NoHighlightedWord));
    }

    #[test]
    fn test_no_words() {
        assert_eq!(
            tokenize_case("<li>just text</li>"),
            Err(ParseError::NoWordSpans)
        );
    }

    #[test]
    fn test_no_highlighted_words() {
        let html = format!("{} {}", word("a"), word("b"));
        assert_eq!(tokenize_case(&html), Err(ParseError::NoHighlightedWord));
    }

    #[test]
    fn test_class_without_separator_not_highlighted() {
        let html = r#"<span class="b-wrd-explg-em" explain="dz0x">X</span>"#;
        assert_eq!(tokenize_case(html), Err(ParseError::NoHighlightedWord));
    }
}
