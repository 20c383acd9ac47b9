//! Lines and their original terminators

use serde::{Deserialize, Serialize};
use std::fmt;

/// The terminator that ended a line in its source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// No terminator (only ever the last line of a source)
    None,
}

impl LineEnding {
    /// The literal terminator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }

    pub fn is_terminated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A single line of text together with the terminator it had in its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Line content, without the terminator
    pub text: String,
    /// Terminator that followed the content
    pub ending: LineEnding,
}

impl Line {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            text: text.into(),
            ending,
        }
    }

    /// A line terminated by `\n`.
    pub fn lf(text: impl Into<String>) -> Self {
        Self::new(text, LineEnding::Lf)
    }

    /// A line terminated by `\r\n`.
    pub fn crlf(text: impl Into<String>) -> Self {
        Self::new(text, LineEnding::CrLf)
    }

    /// A line with no terminator.
    pub fn unterminated(text: impl Into<String>) -> Self {
        Self::new(text, LineEnding::None)
    }

    /// Same text, different terminator.
    pub fn with_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    /// Byte length of the rendered line, terminator included.
    pub fn rendered_len(&self) -> usize {
        self.text.len() + self.ending.as_str().len()
    }

    pub(crate) fn render_into(&self, out: &mut String) {
        out.push_str(&self.text);
        out.push_str(self.ending.as_str());
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.text, self.ending.as_str())
    }
}

/// Split text into lines, keeping each line's terminator.
///
/// Joining the returned lines reproduces `source` exactly. A lone `\r` is
/// not a terminator and stays part of the text. An empty source has no
/// lines.
pub fn split_lines(source: &str) -> Vec<Line> {
    source
        .split_inclusive('\n')
        .map(|piece| {
            if let Some(text) = piece.strip_suffix("\r\n") {
                Line::crlf(text)
            } else if let Some(text) = piece.strip_suffix('\n') {
                Line::lf(text)
            } else {
                Line::unterminated(piece)
            }
        })
        .collect()
}
