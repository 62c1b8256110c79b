//! Tab-separated record output.
//!
//! The output starts with three `key=value` header lines followed by one
//! line per case:
//!
//! ```text
//! url=<query url>
//! docs=<total documents>
//! cases=<total cases>
//! <document index>\t<plain>\t<highlighted>\t<plain>...\t<title>
//! ```

use std::io::Write;

use crate::error::Result;
use crate::types::{Case, Document, PageStats};

/// Writes the header and case records of a harvest.
pub struct RecordWriter<W: Write> {
    out: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the three header lines.
    pub fn write_header(&mut self, query: &str, stats: &PageStats) -> Result<()> {
        writeln!(self.out, "url={query}")?;
        writeln!(self.out, "docs={}", stats.total_documents)?;
        writeln!(self.out, "cases={}", stats.total_cases)?;
        Ok(())
    }

    /// Write one line per case of `document`.
    ///
    /// Returns the number of lines written.
    pub fn write_document(&mut self, document: &Document) -> Result<usize> {
        for case in &document.cases {
            writeln!(self.out, "{}", format_record(document.index, case, &document.title))?;
        }
        Ok(document.cases.len())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format one case record, without the trailing newline.
///
/// # Examples
/// ```
/// use ruscorpora_harvester::output::format_record;
/// use ruscorpora_harvester::types::Case;
///
/// let case = Case::from_texts(vec!["A ".into(), "X".into(), " B".into()]).unwrap();
/// assert_eq!(format_record(1, &case, "Title1"), "1\tA \tX\t B\tTitle1");
/// ```
pub fn format_record(index: usize, case: &Case, title: &str) -> String {
    let mut line = index.to_string();
    for segment in case.segments() {
        line.push('\t');
        line.push_str(&segment.text);
    }
    line.push('\t');
    line.push_str(title);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(parts: &[&str]) -> Case {
        Case::from_texts(parts.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_header() {
        let mut writer = RecordWriter::new(Vec::new());
        writer
            .write_header(
                "https://processing.ruscorpora.ru/search.xml?req=x",
                &PageStats {
                    total_documents: 12,
                    total_cases: 40,
                },
            )
            .unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "url=https://processing.ruscorpora.ru/search.xml?req=x\ndocs=12\ncases=40\n"
        );
    }

    #[test]
    fn test_document_lines() {
        let document = Document {
            index: 7,
            title: "Повесть".to_string(),
            cases: vec![case(&["", "X", "", "Y", "."]), case(&["a ", "b", ""])],
        };
        let mut writer = RecordWriter::new(Vec::new());
        assert_eq!(writer.write_document(&document).unwrap(), 2);

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "7\t\tX\t\tY\t.\tПовесть\n7\ta \tb\t\tПовесть\n");
    }
}
