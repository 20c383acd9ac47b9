//! Locate command implementation
//!
//! Reports where the block opened at an anchor ends, without editing.

use colored::Colorize;
use serde_json::json;
use splice_content::{find_anchor, locate_block};
use std::path::Path;

use super::{build_anchor, build_pair};
use crate::cli::{AnchorArgs, DelimiterArgs};
use crate::error::Result;

/// Run the locate command
pub fn run_locate(
    file: &Path,
    anchor: &AnchorArgs,
    delimiters: &DelimiterArgs,
    print: bool,
    json: bool,
) -> Result<()> {
    let document = splice_fs::read_document(file)?;
    let anchor_line = find_anchor(&document, &build_anchor(anchor)?)?;
    let region = locate_block(&document, anchor_line, &build_pair(delimiters)?)?;
    let (start, end) = region.line_numbers();
    let block = &document.lines()[region.start..=region.end];

    if json {
        let mut json_output = json!({
            "path": file.display().to_string(),
            "start_line": start,
            "end_line": end,
            "line_count": region.line_count(),
        });
        if print {
            json_output["content"] = json!(block.iter().map(|l| l.text.as_str()).collect::<Vec<_>>());
        }
        println!("{}", serde_json::to_string_pretty(&json_output)?);
        return Ok(());
    }

    println!(
        "{} {} lines {}-{} ({} lines)",
        "Block".blue().bold(),
        file.display().to_string().yellow(),
        start,
        end,
        region.line_count()
    );
    if print {
        for (offset, line) in block.iter().enumerate() {
            println!("{:>6} {} {}", start + offset, "|".dimmed(), line.text);
        }
    }

    Ok(())
}
