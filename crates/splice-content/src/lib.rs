//! Balanced block locating and splicing for line-oriented markup
//!
//! Finds an anchor line, walks forward counting delimiter depth until the
//! block it opens is closed again, and splices replacement lines into the
//! located region. Every operation takes a [`Document`] snapshot and returns
//! a new one; nothing here touches the filesystem.

pub mod anchor;
pub mod depth;
pub mod diff;
pub mod document;
pub mod edit;
pub mod error;
pub mod line;
pub mod locate;
pub mod ops;

pub use anchor::{Anchor, Cardinality, Matcher, find_all, find_anchor};
pub use depth::DelimiterPair;
pub use diff::{DocumentDiff, LineChange};
pub use document::Document;
pub use edit::{Edit, EditKind};
pub use error::{Error, Result};
pub use line::{Line, LineEnding};
pub use locate::{Region, locate_block};
pub use ops::{
    BlockReplace, BlockReplacement, check_payload_balance, insert_after, insert_after_with_edit,
    remove_region, replace_block, replace_region, replace_region_with_edit,
};
