//! Delimiter depth counting
//!
//! Depth is counted per line as `opens - closes`, where both markers are
//! plain substrings counted left to right without overlap. This is not a
//! tag parser: `<div` also counts inside `<divider>`, and a self-closing
//! `<div />` counts as an opening with no matching close. Such input makes
//! the locator report an unbalanced structure instead of guessing.

use crate::error::{Error, Result};
use crate::line::Line;

/// Opening and closing markers of one kind of nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterPair {
    open: String,
    close: String,
}

impl DelimiterPair {
    /// Both markers must be non-empty and distinct.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(Error::InvalidDelimiter {
                reason: "markers must not be empty".to_string(),
            });
        }
        if open == close {
            return Err(Error::InvalidDelimiter {
                reason: format!("open and close markers are both {open:?}"),
            });
        }

        Ok(Self { open, close })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Occurrences of the open marker in `text`.
    pub fn opens(&self, text: &str) -> usize {
        text.matches(self.open.as_str()).count()
    }

    /// Occurrences of the close marker in `text`.
    pub fn closes(&self, text: &str) -> usize {
        text.matches(self.close.as_str()).count()
    }

    /// Net depth change contributed by one line of text.
    pub fn delta(&self, text: &str) -> i64 {
        self.opens(text) as i64 - self.closes(text) as i64
    }

    /// Levels opened in `text` that are still open at its end, reading
    /// markers left to right.
    ///
    /// `</div><div>` has a delta of zero but leaves one level open, while
    /// `<div>x</div>` leaves none.
    pub fn unclosed_opens(&self, text: &str) -> i64 {
        let mut markers: Vec<(usize, i64)> = text
            .match_indices(self.open.as_str())
            .map(|(at, _)| (at, 1))
            .chain(text.match_indices(self.close.as_str()).map(|(at, _)| (at, -1)))
            .collect();
        markers.sort_by_key(|&(at, step)| (at, -step));

        let (mut depth, mut lowest) = (0i64, 0i64);
        for (_, step) in markers {
            depth += step;
            lowest = lowest.min(depth);
        }
        depth - lowest
    }

    /// Sum of deltas over a run of lines.
    pub fn net_depth<'a>(&self, lines: impl IntoIterator<Item = &'a Line>) -> i64 {
        lines.into_iter().map(|line| self.delta(&line.text)).sum()
    }
}
