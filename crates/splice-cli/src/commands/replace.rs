//! Replace command implementation

use serde_json::json;
use splice_content::{BlockReplace, replace_block};
use std::path::Path;

use super::output::{OutputMode, commit};
use super::{build_anchor, build_pair};
use crate::cli::{AnchorArgs, DelimiterArgs};
use crate::error::Result;

/// Run the replace command
///
/// Swaps the whole block opened at the anchor, anchor line included, for
/// the lines of `payload`.
pub fn run_replace(
    file: &Path,
    anchor: &AnchorArgs,
    delimiters: &DelimiterArgs,
    payload: &Path,
    check_payload: bool,
    mode: OutputMode,
) -> Result<()> {
    let document = splice_fs::read_document(file)?;
    let mut request = BlockReplace::new(
        build_anchor(anchor)?,
        build_pair(delimiters)?,
        splice_fs::read_payload(payload)?,
    );
    request.check_payload = check_payload;

    let replacement = replace_block(&document, &request)?;
    let (start, end) = replacement.region.line_numbers();
    let details = json!({
        "kind": "replace_block",
        "start_line": start,
        "end_line": end,
        "payload_lines": request.payload.len(),
    });

    commit(file, &document, &replacement.document, mode, details)
}
