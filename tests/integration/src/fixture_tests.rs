//! Fixture-driven tests for the full read, edit, write flow
//!
//! Uses `test-fixtures/sidebar`: a CRLF page, a replacement sidebar, the
//! plan that edits it, and the page as it should look afterwards.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use splice_content::{
    Anchor, BlockReplace, DelimiterPair, Document, Line, LineEnding, find_anchor, insert_after,
    locate_block, replace_block,
};
use splice_fs::{ConfigStore, read_document, read_payload, write_document};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STATES: [&str; 2] = [
    "    const [showCourierSubmenu, setShowCourierSubmenu] = useState(false)",
    "    const [showRestaurantSubmenu, setShowRestaurantSubmenu] = useState(false)",
];

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/sidebar")
}

/// Copy the fixture set into a scratch directory.
fn scratch() -> TempDir {
    let temp = TempDir::new().unwrap();
    for name in ["page.tsx", "sidebar_new.txt", "plan.toml"] {
        fs::copy(fixtures().join(name), temp.path().join(name)).unwrap();
    }
    temp
}

fn divs() -> DelimiterPair {
    DelimiterPair::new("<div", "</div>").unwrap()
}

fn sidebar_anchor() -> Anchor {
    Anchor::pattern(r"relative bg-slate-900 w-\d+").unwrap()
}

fn add_states(document: &Document) -> Document {
    let anchor_line = find_anchor(
        document,
        &Anchor::literal("const [showMenu, setShowMenu] = useState(false)"),
    )
    .unwrap();
    let lines: Vec<Line> = STATES.iter().map(|s| Line::crlf(*s)).collect();
    insert_after(document, anchor_line, &lines).unwrap()
}

#[test]
fn fixture_page_reads_back_byte_for_byte() {
    let raw = fs::read_to_string(fixtures().join("page.tsx")).unwrap();
    let document = read_document(&fixtures().join("page.tsx")).unwrap();

    assert_eq!(document.render(), raw);
    assert!(
        document
            .lines()
            .iter()
            .all(|line| line.ending == LineEnding::CrLf)
    );
}

#[test]
fn sidebar_block_spans_the_whole_sidebar() {
    let document = read_document(&fixtures().join("page.tsx")).unwrap();
    let anchor_line = find_anchor(&document, &sidebar_anchor()).unwrap();
    let region = locate_block(&document, anchor_line, &divs()).unwrap();

    assert_eq!(region.line_numbers(), (11, 20));
    assert_eq!(
        document.line(region.end).unwrap().text.trim(),
        "</div>"
    );
}

#[test]
fn edits_produce_expected_page() {
    let temp = scratch();
    let page = temp.path().join("page.tsx");

    let document = read_document(&page).unwrap();
    let with_states = add_states(&document);
    let request = BlockReplace::new(
        sidebar_anchor(),
        divs(),
        read_payload(&temp.path().join("sidebar_new.txt")).unwrap(),
    );
    let replaced = replace_block(&with_states, &request).unwrap();
    write_document(&page, &replaced.document).unwrap();

    let expected = fs::read_to_string(fixtures().join("page.expected.tsx")).unwrap();
    assert_eq!(fs::read_to_string(&page).unwrap(), expected);
}

#[test]
fn edits_are_independent_of_order() {
    let document = read_document(&fixtures().join("page.tsx")).unwrap();
    let request = BlockReplace::new(
        sidebar_anchor(),
        divs(),
        read_payload(&fixtures().join("sidebar_new.txt")).unwrap(),
    );

    let states_first = replace_block(&add_states(&document), &request).unwrap().document;
    let sidebar_first = add_states(&replace_block(&document, &request).unwrap().document);

    assert_eq!(states_first, sidebar_first);
}

#[test]
fn state_insertion_happens_once() {
    let document = read_document(&fixtures().join("page.tsx")).unwrap();
    let once = add_states(&document);
    let anchor_line = find_anchor(&once, &Anchor::literal("setShowMenu] =")).unwrap();
    let lines: Vec<Line> = STATES.iter().map(|s| Line::crlf(*s)).collect();

    let err = insert_after(&once, anchor_line, &lines).unwrap_err();
    assert_eq!(err.code(), "already_inserted");
}

#[derive(Debug, Deserialize)]
struct PlanHeader {
    target: PathBuf,
    steps: Vec<PlanStep>,
}

#[derive(Debug, Deserialize)]
struct PlanStep {
    kind: String,
}

#[test]
fn fixture_plan_loads_through_config_store() {
    let plan: PlanHeader = ConfigStore::new()
        .load(&fixtures().join("plan.toml"))
        .unwrap();

    assert_eq!(plan.target, PathBuf::from("page.tsx"));
    let kinds: Vec<&str> = plan.steps.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(kinds, ["insert_after", "replace_block"]);
}
