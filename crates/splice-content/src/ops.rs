//! Region replacement and anchored insertion

use tracing::debug;

use crate::anchor::{Anchor, find_anchor};
use crate::depth::DelimiterPair;
use crate::document::Document;
use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::line::{Line, LineEnding};
use crate::locate::{Region, locate_block};

/// Replace the lines of `region` with `payload`.
///
/// Everything outside the region is carried over untouched. See
/// [`replace_region_with_edit`] for terminator handling.
pub fn replace_region(document: &Document, region: &Region, payload: &[Line]) -> Result<Document> {
    replace_region_with_edit(document, region, payload).map(|(result, _)| result)
}

/// Replace the lines of `region` with `payload`, also returning the edit.
///
/// When more lines follow the region and the payload's last line has no
/// terminator, it takes the terminator of the region's last line so the
/// next line stays on its own line. An empty payload deletes the region.
pub fn replace_region_with_edit(
    document: &Document,
    region: &Region,
    payload: &[Line],
) -> Result<(Document, Edit)> {
    region.validate(document)?;

    let lines = document.lines();
    let old_lines = lines[region.start..=region.end].to_vec();
    let mut new_lines = payload.to_vec();
    if region.end + 1 < lines.len() {
        terminate_last(&mut new_lines, lines[region.end].ending);
    }

    let edit = if new_lines.is_empty() {
        Edit::delete(region.start, old_lines)
    } else {
        Edit::replace(region.start, old_lines, new_lines)
    };
    let result = edit.apply(document)?;

    debug!(
        start = region.start,
        end = region.end,
        inserted = edit.new_lines.len(),
        "region replaced"
    );
    Ok((result, edit))
}

/// Remove the lines of `region`.
pub fn remove_region(document: &Document, region: &Region) -> Result<Document> {
    replace_region(document, region, &[])
}

/// Insert `new_lines` directly after `anchor_line`.
///
/// Fails with [`Error::AlreadyInserted`] when the lines following the
/// anchor already have the same text as `new_lines`, so running the same
/// insertion twice never duplicates content.
pub fn insert_after(document: &Document, anchor_line: usize, new_lines: &[Line]) -> Result<Document> {
    insert_after_with_edit(document, anchor_line, new_lines).map(|(result, _)| result)
}

/// Like [`insert_after`], also returning the edit.
///
/// An unterminated anchor (the document's last line) is given a
/// terminator so the inserted lines start on a line of their own; the edit
/// then replaces the anchor line rather than purely inserting.
pub fn insert_after_with_edit(
    document: &Document,
    anchor_line: usize,
    new_lines: &[Line],
) -> Result<(Document, Edit)> {
    let lines = document.lines();
    let anchor = lines.get(anchor_line).ok_or(Error::LineOutOfRange {
        line: anchor_line,
        len: lines.len(),
    })?;
    let at = anchor_line + 1;

    if new_lines.is_empty() {
        return Ok((document.clone(), Edit::insert(at, Vec::new())));
    }

    let following = &lines[at..];
    let already_present = following.len() >= new_lines.len()
        && following
            .iter()
            .zip(new_lines)
            .all(|(existing, new)| existing.text == new.text);
    if already_present {
        return Err(Error::AlreadyInserted { line: anchor_line });
    }

    let mut inserted = new_lines.to_vec();
    if at < lines.len() {
        terminate_last(&mut inserted, anchor.ending);
    }

    let edit = if anchor.ending.is_terminated() {
        Edit::insert(at, inserted)
    } else {
        let ending = match new_lines[0].ending {
            LineEnding::None => document.dominant_ending(),
            ending => ending,
        };
        let mut replacement = Vec::with_capacity(inserted.len() + 1);
        replacement.push(anchor.clone().with_ending(ending));
        replacement.extend(inserted);
        Edit::replace(anchor_line, vec![anchor.clone()], replacement)
    };
    let result = edit.apply(document)?;

    debug!(anchor = anchor_line, inserted = new_lines.len(), "lines inserted");
    Ok((result, edit))
}

/// Check that `payload` is balanced for `pair` on its own.
///
/// The running depth must never drop below zero and must end at zero.
/// The reported depth is the offending running depth.
pub fn check_payload_balance(payload: &[Line], pair: &DelimiterPair) -> Result<()> {
    let mut depth = 0i64;
    for line in payload {
        depth += pair.delta(&line.text);
        if depth < 0 {
            return Err(Error::PayloadImbalance { depth });
        }
    }
    if depth != 0 {
        return Err(Error::PayloadImbalance { depth });
    }
    Ok(())
}

/// Request to replace the block opened at an anchor.
#[derive(Debug, Clone)]
pub struct BlockReplace {
    pub anchor: Anchor,
    pub pair: DelimiterPair,
    pub payload: Vec<Line>,
    /// Reject payloads that are not balanced for `pair` (default: true)
    pub check_payload: bool,
}

impl BlockReplace {
    pub fn new(anchor: Anchor, pair: DelimiterPair, payload: Vec<Line>) -> Self {
        Self {
            anchor,
            pair,
            payload,
            check_payload: true,
        }
    }

    pub fn without_payload_check(mut self) -> Self {
        self.check_payload = false;
        self
    }
}

/// Outcome of [`replace_block`].
#[derive(Debug, Clone)]
pub struct BlockReplacement {
    /// The edited document
    pub document: Document,
    /// The block that was replaced, bound to the original document
    pub region: Region,
    pub edit: Edit,
}

/// Find the anchor, locate its block, and replace the block with the payload.
pub fn replace_block(document: &Document, request: &BlockReplace) -> Result<BlockReplacement> {
    let anchor_line = find_anchor(document, &request.anchor)?;
    let region = locate_block(document, anchor_line, &request.pair)?;
    if request.check_payload {
        check_payload_balance(&request.payload, &request.pair)?;
    }
    let (result, edit) = replace_region_with_edit(document, &region, &request.payload)?;
    Ok(BlockReplacement {
        document: result,
        region,
        edit,
    })
}

fn terminate_last(lines: &mut [Line], ending: LineEnding) {
    if let Some(last) = lines.last_mut() {
        if !last.ending.is_terminated() {
            last.ending = ending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn divs() -> DelimiterPair {
        DelimiterPair::new("<div", "</div>").unwrap()
    }

    #[test]
    fn unterminated_payload_does_not_swallow_next_line() {
        let doc = Document::parse("<div>\r\n</div>\r\ntail\r\n");
        let region = Region::new(0, 1).unwrap();
        let result = replace_region(&doc, &region, &[Line::unterminated("new")]).unwrap();
        assert_eq!(result.render(), "new\r\ntail\r\n");
    }

    #[test]
    fn unterminated_payload_at_end_stays_unterminated() {
        let doc = Document::parse("head\n<div>\n</div>\n");
        let region = Region::new(1, 2).unwrap();
        let result = replace_region(&doc, &region, &[Line::unterminated("new")]).unwrap();
        assert_eq!(result.render(), "head\nnew");
    }

    #[test]
    fn empty_payload_deletes() {
        let doc = Document::parse("a\nb\nc\n");
        let region = Region::new(1, 1).unwrap();
        let (result, edit) = replace_region_with_edit(&doc, &region, &[]).unwrap();
        assert_eq!(result.render(), "a\nc\n");
        assert_eq!(edit.kind, crate::edit::EditKind::Delete);
        assert_eq!(remove_region(&doc, &region).unwrap(), result);
    }

    #[test]
    fn out_of_range_region_is_rejected() {
        let doc = Document::parse("a\n");
        let region = Region::new(0, 1).unwrap();
        assert!(matches!(
            replace_region(&doc, &region, &[]),
            Err(Error::InvalidRegion { start: 0, end: 1, .. })
        ));
    }

    #[test]
    fn insert_after_unterminated_last_line() {
        let doc = Document::parse("a\r\nlast");
        let result = insert_after(&doc, 1, &[Line::crlf("new")]).unwrap();
        assert_eq!(result.render(), "a\r\nlast\r\nnew\r\n");
    }

    #[test]
    fn insert_after_unterminated_last_line_uses_document_ending() {
        let doc = Document::parse("a\r\nb\r\nlast");
        let result = insert_after(&doc, 2, &[Line::unterminated("new")]).unwrap();
        assert_eq!(result.render(), "a\r\nb\r\nlast\r\nnew");
    }

    #[test]
    fn insert_empty_is_noop() {
        let doc = Document::parse("a\nb\n");
        let (result, edit) = insert_after_with_edit(&doc, 0, &[]).unwrap();
        assert_eq!(result, doc);
        assert!(edit.is_noop());
    }

    #[test]
    fn payload_balance_rejects_early_close() {
        let payload = [Line::lf("</div>"), Line::lf("<div>")];
        assert!(matches!(
            check_payload_balance(&payload, &divs()),
            Err(Error::PayloadImbalance { depth: -1 })
        ));
    }

    #[test]
    fn payload_balance_rejects_unclosed() {
        let payload = [Line::lf("<div>"), Line::lf("<div>"), Line::lf("</div>")];
        assert!(matches!(
            check_payload_balance(&payload, &divs()),
            Err(Error::PayloadImbalance { depth: 1 })
        ));
    }

    #[test]
    fn payload_balance_accepts_balanced_and_empty() {
        let payload = [Line::lf("<div>"), Line::lf("  <div>x</div>"), Line::lf("</div>")];
        assert!(check_payload_balance(&payload, &divs()).is_ok());
        assert!(check_payload_balance(&[], &divs()).is_ok());
    }
}
