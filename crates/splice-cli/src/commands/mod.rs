//! Command implementations for splice-cli

pub mod apply;
pub mod insert;
pub mod locate;
pub mod output;
pub mod replace;

pub use apply::run_apply;
pub use insert::run_insert;
pub use locate::run_locate;
pub use output::OutputMode;
pub use replace::run_replace;

use splice_content::{Anchor, DelimiterPair};

use crate::cli::{AnchorArgs, DelimiterArgs};
use crate::error::Result;
use crate::plan::AnchorSpec;

/// Compile anchor arguments the same way plan anchors are compiled.
fn build_anchor(args: &AnchorArgs) -> Result<Anchor> {
    let spec = if args.regex {
        AnchorSpec {
            regex: Some(args.anchor.clone()),
            literal: None,
            occurrence: args.occurrence,
        }
    } else {
        AnchorSpec {
            literal: Some(args.anchor.clone()),
            regex: None,
            occurrence: args.occurrence,
        }
    };
    spec.compile()
}

fn build_pair(args: &DelimiterArgs) -> Result<DelimiterPair> {
    Ok(DelimiterPair::new(args.open.as_str(), args.close.as_str())?)
}
