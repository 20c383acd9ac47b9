//! Edit records for line splices.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::Line;

/// The kind of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditKind {
    /// Insert new lines.
    Insert,
    /// Replace existing lines.
    Replace,
    /// Delete lines.
    Delete,
}

/// A single splice: `old_lines` at `start` become `new_lines`.
///
/// Edits carry the lines they remove, so they can be checked against the
/// document they are applied to and inverted for undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Index of the first affected line.
    pub start: usize,
    /// Lines removed by the edit.
    pub old_lines: Vec<Line>,
    /// Lines inserted by the edit.
    pub new_lines: Vec<Line>,
}

impl Edit {
    pub fn insert(start: usize, new_lines: Vec<Line>) -> Self {
        Self {
            kind: EditKind::Insert,
            start,
            old_lines: Vec::new(),
            new_lines,
        }
    }

    pub fn replace(start: usize, old_lines: Vec<Line>, new_lines: Vec<Line>) -> Self {
        Self {
            kind: EditKind::Replace,
            start,
            old_lines,
            new_lines,
        }
    }

    pub fn delete(start: usize, old_lines: Vec<Line>) -> Self {
        Self {
            kind: EditKind::Delete,
            start,
            old_lines,
            new_lines: Vec::new(),
        }
    }

    /// Line range removed from the original document.
    pub fn removed_range(&self) -> Range<usize> {
        self.start..self.start + self.old_lines.len()
    }

    /// Line range occupied by the new lines in the resulting document.
    pub fn inserted_range(&self) -> Range<usize> {
        self.start..self.start + self.new_lines.len()
    }

    /// Whether applying this edit changes nothing.
    pub fn is_noop(&self) -> bool {
        self.old_lines == self.new_lines
    }

    /// Apply to `document`, producing a new document.
    ///
    /// The lines at `start` must equal `old_lines` exactly, terminators
    /// included; otherwise the edit belongs to another snapshot.
    pub fn apply(&self, document: &Document) -> Result<Document> {
        let lines = document.lines();
        let removed = self.removed_range();

        if self.start > lines.len() || removed.end > lines.len() {
            return Err(Error::LineOutOfRange {
                line: removed.end.max(self.start),
                len: lines.len(),
            });
        }
        if let Some(offset) = lines[removed.clone()]
            .iter()
            .zip(&self.old_lines)
            .position(|(current, recorded)| current != recorded)
        {
            return Err(Error::EditConflict {
                line: self.start + offset,
            });
        }

        let mut result =
            Vec::with_capacity(lines.len() - self.old_lines.len() + self.new_lines.len());
        result.extend_from_slice(&lines[..removed.start]);
        result.extend_from_slice(&self.new_lines);
        result.extend_from_slice(&lines[removed.end..]);
        Ok(Document::from_lines(result))
    }

    /// The edit that undoes this one.
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            EditKind::Insert => EditKind::Delete,
            EditKind::Delete => EditKind::Insert,
            EditKind::Replace => EditKind::Replace,
        };
        Self {
            kind,
            start: self.start,
            old_lines: self.new_lines.clone(),
            new_lines: self.old_lines.clone(),
        }
    }
}
