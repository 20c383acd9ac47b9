//! Balanced block location

use serde::Serialize;
use tracing::debug;

use crate::depth::DelimiterPair;
use crate::document::Document;
use crate::error::{Error, Result};

/// A closed range of line indices `[start, end]`.
///
/// Regions produced by [`locate_block`] remember the fingerprint of the
/// document they were computed from and are rejected when applied to any
/// other snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
    #[serde(skip)]
    snapshot: Option<String>,
}

impl Region {
    /// An unbound region. The caller is responsible for pairing it with the
    /// right document.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_region(start, end, "start is after end"));
        }
        Ok(Self {
            start,
            end,
            snapshot: None,
        })
    }

    fn bound(start: usize, end: usize, document: &Document) -> Self {
        Self {
            start,
            end,
            snapshot: Some(document.fingerprint()),
        }
    }

    /// Bind this region to `document`'s current snapshot.
    pub fn bind(mut self, document: &Document) -> Self {
        self.snapshot = Some(document.fingerprint());
        self
    }

    /// Fingerprint of the snapshot this region was computed from, if bound.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Number of lines covered.
    pub fn line_count(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// 1-based inclusive line numbers, for display.
    pub fn line_numbers(&self) -> (usize, usize) {
        (self.start + 1, self.end + 1)
    }

    /// Check that this region may be applied to `document`.
    pub fn validate(&self, document: &Document) -> Result<()> {
        if self.start > self.end {
            return Err(Error::invalid_region(
                self.start,
                self.end,
                "start is after end",
            ));
        }
        if let Some(snapshot) = &self.snapshot {
            if *snapshot != document.fingerprint() {
                return Err(Error::StaleRegion {
                    start: self.start,
                    end: self.end,
                });
            }
        }
        if self.end >= document.len() {
            return Err(Error::invalid_region(
                self.start,
                self.end,
                format!("document has {} lines", document.len()),
            ));
        }
        Ok(())
    }
}

/// Find the line that closes the block opened at `anchor_line`.
///
/// Depth starts at the anchor line's own delta and accumulates over every
/// following line; the first line where it drops to zero or below closes
/// the block. A line may close several levels at once, so "below zero"
/// still ends the block on that line.
///
/// An anchor line whose opens and closes cancel out in order
/// (`<div>x</div>`) is a block by itself. One that first closes an earlier
/// block and then opens a new one (`</div><div>`) starts with the levels it
/// leaves open. An anchor line that opens nothing fails with
/// [`Error::NotBlockOpener`], and running out of lines while still nested
/// fails with [`Error::UnbalancedStructure`].
pub fn locate_block(
    document: &Document,
    anchor_line: usize,
    pair: &DelimiterPair,
) -> Result<Region> {
    let lines = document.lines();
    let anchor = lines.get(anchor_line).ok_or(Error::LineOutOfRange {
        line: anchor_line,
        len: lines.len(),
    })?;

    let mut depth = pair.delta(&anchor.text);
    if depth <= 0 {
        let unclosed = pair.unclosed_opens(&anchor.text);
        if unclosed > 0 {
            // The line closes an earlier block before opening this one
            depth = unclosed;
        } else if depth == 0 && pair.opens(&anchor.text) > 0 {
            debug!(start = anchor_line, "single-line block");
            return Ok(Region::bound(anchor_line, anchor_line, document));
        } else {
            return Err(Error::NotBlockOpener { line: anchor_line });
        }
    }

    // Invariant: after line i, depth is the nesting level at the end of
    // line i relative to the start of the anchor line.
    for (index, line) in lines.iter().enumerate().skip(anchor_line + 1) {
        depth += pair.delta(&line.text);
        if depth <= 0 {
            debug!(start = anchor_line, end = index, "block located");
            return Ok(Region::bound(anchor_line, index, document));
        }
    }

    debug!(start = anchor_line, depth, "reached end of document inside block");
    Err(Error::UnbalancedStructure {
        start: anchor_line,
        depth,
    })
}
