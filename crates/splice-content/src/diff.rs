//! Line diffs between document snapshots

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::document::Document;

/// Result of comparing two snapshots line by line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDiff {
    /// Are the rendered documents byte-identical?
    pub is_identical: bool,
    /// Added and removed lines, in diff order
    pub changes: Vec<LineChange>,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
    #[serde(skip)]
    old: String,
    #[serde(skip)]
    new: String,
}

/// One changed line. `line` is 0-based in the old document for removals
/// and in the new document for additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum LineChange {
    Added { line: usize, content: String },
    Removed { line: usize, content: String },
}

impl DocumentDiff {
    /// Compute a line diff between two documents.
    ///
    /// Uses the `similar` crate's TextDiff on the rendered text, so a
    /// terminator change shows up as a changed line.
    pub fn compute(old: &Document, new: &Document) -> Self {
        let old = old.render();
        let new = new.render();

        if old == new {
            return Self {
                is_identical: true,
                changes: Vec::new(),
                similarity: 1.0,
                old,
                new,
            };
        }

        let text_diff = TextDiff::from_lines(&old, &new);
        let similarity = text_diff.ratio() as f64;

        let mut changes = Vec::new();
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => changes.push(LineChange::Removed {
                    line: change.old_index().unwrap_or_default(),
                    content: change.value().to_string(),
                }),
                ChangeTag::Insert => changes.push(LineChange::Added {
                    line: change.new_index().unwrap_or_default(),
                    content: change.value().to_string(),
                }),
                ChangeTag::Equal => {}
            }
        }

        Self {
            is_identical: false,
            changes,
            similarity,
            old,
            new,
        }
    }

    pub fn added(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LineChange::Added { .. }))
            .count()
    }

    pub fn removed(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LineChange::Removed { .. }))
            .count()
    }

    /// Render as a unified diff with `context` lines around each hunk.
    ///
    /// Empty when the documents are identical.
    pub fn unified(&self, context: usize, old_label: &str, new_label: &str) -> String {
        if self.is_identical {
            return String::new();
        }
        TextDiff::from_lines(&self.old, &self.new)
            .unified_diff()
            .context_radius(context)
            .header(old_label, new_label)
            .to_string()
    }
}
