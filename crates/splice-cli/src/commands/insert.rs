//! Insert command implementation

use serde_json::json;
use splice_content::{find_anchor, insert_after};
use std::path::Path;

use super::build_anchor;
use super::output::{OutputMode, commit};
use crate::cli::AnchorArgs;
use crate::error::Result;
use crate::plan::{EndingSpec, insertion_lines};

/// Run the insert command
pub fn run_insert(
    file: &Path,
    anchor: &AnchorArgs,
    lines: &[String],
    payload: Option<&Path>,
    ending: EndingSpec,
    mode: OutputMode,
) -> Result<()> {
    let document = splice_fs::read_document(file)?;
    let anchor_line = find_anchor(&document, &build_anchor(anchor)?)?;
    let new_lines = insertion_lines(&document, anchor_line, lines, payload, ending)?;

    let edited = insert_after(&document, anchor_line, &new_lines)?;
    let details = json!({
        "kind": "insert_after",
        "anchor_line": anchor_line + 1,
        "inserted_lines": new_lines.len(),
    });

    commit(file, &document, &edited, mode, details)
}
