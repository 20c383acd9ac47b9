//! Tests for balanced block location

use pretty_assertions::assert_eq;
use splice_content::{Anchor, DelimiterPair, Document, Error, LineEnding, find_anchor, locate_block};

fn divs() -> DelimiterPair {
    DelimiterPair::new("<div", "</div>").unwrap()
}

const PAGE: &str = r#"export default function Page() {
  return (
    <main>
      {showMenu && (
        <div className="fixed inset-0 z-50">
          <div className="relative bg-slate-900 w-80 h-full overflow-y-auto p-6">
            <h2>Menu</h2>
            <div className="space-y-2">
              <button>Orders</button>
              <div className="divider" />
            </div>
          </div>
        </div>
      )}
      <footer>tail</footer>
    </main>
  )
}
"#;

#[test]
fn concrete_nested_scenario() {
    let doc = Document::from_texts(
        ["<div>", "<div>", "</div>", "</div>", "<p>tail</p>"],
        LineEnding::Lf,
    );
    let pair = DelimiterPair::new("<div>", "</div>").unwrap();
    let region = locate_block(&doc, 0, &pair).unwrap();
    assert_eq!((region.start, region.end), (0, 3));
}

#[test]
fn self_closing_line_is_counted_as_open_and_breaks_balance() {
    let doc = Document::parse(PAGE);
    let anchor = Anchor::literal("relative bg-slate-900");
    let start = find_anchor(&doc, &anchor).unwrap();
    assert_eq!(start, 5);

    // `<div className="divider" />` opens a level nothing closes, so the
    // sidebar block appears to end one line late, at the outer close.
    let region = locate_block(&doc, start, &divs()).unwrap();
    assert_eq!(region.end, 12);
}

#[test]
fn sidebar_block_without_self_closing_divs() {
    let source = PAGE.replace("              <div className=\"divider\" />\n", "");
    let doc = Document::parse(&source);
    let start = find_anchor(&doc, &Anchor::literal("relative bg-slate-900")).unwrap();
    let region = locate_block(&doc, start, &divs()).unwrap();

    assert_eq!((region.start, region.end), (5, 10));
    assert_eq!(doc.line(region.end).unwrap().text, "          </div>");
}

#[test]
fn unclosed_block_is_unbalanced() {
    let doc = Document::parse("<div>\n  <div>\n  </div>\ntext\n");
    let err = locate_block(&doc, 0, &divs()).unwrap_err();
    assert!(matches!(err, Error::UnbalancedStructure { start: 0, depth: 1 }));
}

#[test]
fn unclosed_self_closing_tag_is_unbalanced() {
    let doc = Document::parse("<div>\n  <div />\n</div>\n");
    assert!(matches!(
        locate_block(&doc, 0, &divs()),
        Err(Error::UnbalancedStructure { start: 0, depth: 1 })
    ));
}

#[test]
fn terminators_do_not_affect_location() {
    let lf = Document::parse("<div>\n<div>\n</div>\n</div>\n");
    let crlf = Document::parse("<div>\r\n<div>\r\n</div>\r\n</div>\r\n");
    let a = locate_block(&lf, 0, &divs()).unwrap();
    let b = locate_block(&crlf, 0, &divs()).unwrap();
    assert_eq!((a.start, a.end), (b.start, b.end));
    assert_ne!(a.snapshot(), b.snapshot());
}

#[test]
fn region_serializes_without_snapshot() {
    let doc = Document::parse("<div>\n</div>\n");
    let region = locate_block(&doc, 0, &divs()).unwrap();
    let json = serde_json::to_value(&region).unwrap();
    assert_eq!(json, serde_json::json!({ "start": 0, "end": 1 }));
}
