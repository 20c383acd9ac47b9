//! Shared result reporting and committing for editing commands

use colored::Colorize;
use serde_json::{Value, json};
use splice_content::{Document, DocumentDiff};
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// How an editing command reports and whether it writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputMode {
    /// Preview changes without applying them
    pub dry_run: bool,
    /// Output as JSON for scripting
    pub json: bool,
}

/// Write `edited` to `path` unless dry-running, then report the change.
///
/// Identical documents are never rewritten.
pub fn commit(
    path: &Path,
    original: &Document,
    edited: &Document,
    mode: OutputMode,
    details: Value,
) -> Result<()> {
    let diff = DocumentDiff::compute(original, edited);
    let write = !mode.dry_run && !diff.is_identical;

    if write {
        splice_fs::write_document(path, edited)?;
        info!(path = %path.display(), added = diff.added(), removed = diff.removed(), "document written");
    }

    if mode.json {
        let json_output = json!({
            "path": path.display().to_string(),
            "dry_run": mode.dry_run,
            "changed": !diff.is_identical,
            "written": write,
            "added": diff.added(),
            "removed": diff.removed(),
            "similarity": diff.similarity,
            "details": details,
            "changes": diff.changes,
        });
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if mode.dry_run {
        print_diff_output(&diff, path);
    } else if diff.is_identical {
        println!("{} No changes needed.", "OK".green().bold());
    } else {
        println!(
            "{} {} (+{} -{})",
            "Updated".green().bold(),
            path.display().to_string().yellow(),
            diff.added(),
            diff.removed()
        );
    }

    Ok(())
}

/// Print a colored unified diff
fn print_diff_output(diff: &DocumentDiff, path: &Path) {
    if diff.is_identical {
        println!("{} No changes needed.", "OK".green().bold());
        return;
    }

    let label = path.display().to_string();
    let unified = diff.unified(3, &label, &format!("{label} (edited)"));
    for line in unified.lines() {
        let colored_line = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{colored_line}");
    }

    println!();
    println!("Run without {} to apply these changes.", "--dry-run".cyan());
}
