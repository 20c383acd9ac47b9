//! Line-oriented document snapshots

use sha2::{Digest, Sha256};
use std::fmt;

use crate::line::{Line, LineEnding, split_lines};

/// An ordered, immutable sequence of lines.
///
/// Operations never mutate a `Document`; they produce a new one. Rendering
/// a parsed document gives back the exact source it was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Parse text into lines, preserving every terminator verbatim.
    pub fn parse(source: &str) -> Self {
        Self {
            lines: split_lines(source),
        }
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Build a document whose lines all share one terminator.
    pub fn from_texts<I, S>(texts: I, ending: LineEnding) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .map(|text| Line::new(text, ending))
            .collect()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line texts without terminators.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Render back to text.
    pub fn render(&self) -> String {
        let capacity = self.lines.iter().map(Line::rendered_len).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            line.render_into(&mut out);
        }
        out
    }

    /// SHA-256 of the rendered text, hex encoded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for line in &self.lines {
            hasher.update(line.text.as_bytes());
            hasher.update(line.ending.as_str().as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// The most common terminator in the document, `Lf` when there is none.
    ///
    /// Ties go to `Lf`.
    pub fn dominant_ending(&self) -> LineEnding {
        let crlf = self
            .lines
            .iter()
            .filter(|l| l.ending == LineEnding::CrLf)
            .count();
        let lf = self
            .lines
            .iter()
            .filter(|l| l.ending == LineEnding::Lf)
            .count();
        if crlf > lf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

impl FromIterator<Line> for Document {
    fn from_iter<T: IntoIterator<Item = Line>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_matches_sha256_of_rendered_text() {
        let source = "<div>\r\n  x\n</div>";
        let doc = Document::parse(source);

        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        let expected = format!("{:x}", hasher.finalize());

        assert_eq!(doc.fingerprint(), expected);
    }

    #[test]
    fn fingerprint_sees_terminator_changes() {
        let lf = Document::parse("a\nb\n");
        let crlf = Document::parse("a\r\nb\r\n");
        assert_eq!(lf.texts(), crlf.texts());
        assert_ne!(lf.fingerprint(), crlf.fingerprint());
    }

    #[test]
    fn dominant_ending_prefers_majority() {
        assert_eq!(
            Document::parse("a\r\nb\r\nc\n").dominant_ending(),
            LineEnding::CrLf
        );
        assert_eq!(Document::parse("a\r\nb\n").dominant_ending(), LineEnding::Lf);
        assert_eq!(Document::parse("single").dominant_ending(), LineEnding::Lf);
    }

    #[test]
    fn display_matches_render() {
        let doc = Document::parse("one\r\ntwo\nthree");
        assert_eq!(doc.to_string(), doc.render());
    }
}
