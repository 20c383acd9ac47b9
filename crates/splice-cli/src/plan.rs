//! Edit plans: an ordered list of edits applied to one file
//!
//! ```toml
//! target = "src/app/page.tsx"
//!
//! [[steps]]
//! kind = "insert_after"
//! anchor = { literal = "const [showMenu, setShowMenu] = useState(false)" }
//! lines = ["    const [showCourierSubmenu, setShowCourierSubmenu] = useState(false)"]
//!
//! [[steps]]
//! kind = "replace_block"
//! anchor = { literal = "relative bg-slate-900" }
//! open = "<div"
//! close = "</div>"
//! payload = "sidebar_new.txt"
//! ```
//!
//! Relative paths resolve against the directory holding the plan file.

use serde::{Deserialize, Serialize};
use splice_content::{
    Anchor, BlockReplace, Cardinality, DelimiterPair, Document, Line, LineEnding, Matcher,
    find_anchor, insert_after_with_edit, replace_block,
};
use splice_fs::ConfigStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Which matching line an anchor selects. Numbers are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occurrence {
    /// The only matching line
    #[default]
    Unique,
    /// The first matching line
    First,
    /// The n-th matching line
    Nth(usize),
    /// Line number n, which must match
    Line(usize),
}

impl Occurrence {
    pub fn cardinality(self) -> Result<Cardinality> {
        let one_based = |n: usize| {
            n.checked_sub(1)
                .ok_or_else(|| CliError::user("occurrence numbers start at 1"))
        };
        Ok(match self {
            Self::Unique => Cardinality::ExactlyOne,
            Self::First => Cardinality::First,
            Self::Nth(n) => Cardinality::Nth(one_based(n)?),
            Self::Line(n) => Cardinality::AtLine(one_based(n)?),
        })
    }
}

impl FromStr for Occurrence {
    type Err = String;

    /// `unique`, `first`, `nth:<n>` or `line:<n>`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let number = |value: &str| {
            value
                .parse::<usize>()
                .map_err(|_| format!("invalid number in occurrence {s:?}"))
        };
        match s.split_once(':') {
            None if s == "unique" => Ok(Self::Unique),
            None if s == "first" => Ok(Self::First),
            Some(("nth", n)) => Ok(Self::Nth(number(n)?)),
            Some(("line", n)) => Ok(Self::Line(number(n)?)),
            _ => Err(format!(
                "unknown occurrence {s:?} (expected unique, first, nth:<n> or line:<n>)"
            )),
        }
    }
}

/// Anchor as written in a plan file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnchorSpec {
    pub literal: Option<String>,
    pub regex: Option<String>,
    #[serde(default)]
    pub occurrence: Occurrence,
}

impl AnchorSpec {
    pub fn compile(&self) -> Result<Anchor> {
        let matcher = match (&self.literal, &self.regex) {
            (Some(text), None) => Matcher::literal(text.as_str()),
            (None, Some(pattern)) => Matcher::pattern(pattern)?,
            _ => {
                return Err(CliError::user(
                    "anchor needs exactly one of `literal` or `regex`",
                ));
            }
        };
        Ok(Anchor::new(matcher, self.occurrence.cardinality()?))
    }
}

/// Terminator for lines given as plain strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EndingSpec {
    Lf,
    Crlf,
    /// Same as the anchor line, or the document's usual ending
    #[default]
    Auto,
}

impl EndingSpec {
    pub fn resolve(self, document: &Document, anchor_line: usize) -> LineEnding {
        match self {
            Self::Lf => LineEnding::Lf,
            Self::Crlf => LineEnding::CrLf,
            Self::Auto => match document.line(anchor_line).map(|l| l.ending) {
                Some(ending) if ending.is_terminated() => ending,
                _ => document.dominant_ending(),
            },
        }
    }
}

fn default_true() -> bool {
    true
}

/// One edit in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    InsertAfter {
        anchor: AnchorSpec,
        #[serde(default)]
        lines: Vec<String>,
        /// File whose lines are inserted after `lines`
        payload: Option<PathBuf>,
        #[serde(default)]
        ending: EndingSpec,
        /// Treat "already inserted" as success
        #[serde(default)]
        skip_if_present: bool,
    },
    ReplaceBlock {
        anchor: AnchorSpec,
        open: String,
        close: String,
        payload: PathBuf,
        #[serde(default = "default_true")]
        check_payload: bool,
    },
}

/// A target file and the steps to apply to it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditPlan {
    pub target: PathBuf,
    pub steps: Vec<Step>,
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Applied,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// 1-based step number
    pub step: usize,
    pub kind: &'static str,
    pub status: StepStatus,
    /// 1-based inclusive line range the step touched in its input snapshot
    pub lines: (usize, usize),
}

/// Result of running every step of a plan.
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub document: Document,
    pub outcomes: Vec<StepOutcome>,
}

impl EditPlan {
    /// Load a plan and resolve its paths against the plan's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut plan: Self = ConfigStore::new().load(path)?;
        let base = path.parent().unwrap_or(Path::new(""));
        plan.resolve_paths(base);
        debug!(plan = %path.display(), steps = plan.steps.len(), "loaded edit plan");
        Ok(plan)
    }

    fn resolve_paths(&mut self, base: &Path) {
        self.target = base.join(&self.target);
        for step in &mut self.steps {
            match step {
                Step::InsertAfter {
                    payload: Some(payload),
                    ..
                }
                | Step::ReplaceBlock { payload, .. } => *payload = base.join(&*payload),
                Step::InsertAfter { payload: None, .. } => {}
            }
        }
    }

    /// Apply every step to successive snapshots of `document`.
    ///
    /// Stops at the first failing step; nothing is written here.
    pub fn run(&self, document: &Document) -> Result<PlanRun> {
        let mut current = document.clone();
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            let (next, outcome) = run_step(&current, step, number).map_err(|e| e.in_step(number))?;
            info!(step = number, kind = outcome.kind, status = ?outcome.status, "plan step done");
            outcomes.push(outcome);
            current = next;
        }

        Ok(PlanRun {
            document: current,
            outcomes,
        })
    }
}

fn run_step(document: &Document, step: &Step, number: usize) -> Result<(Document, StepOutcome)> {
    match step {
        Step::InsertAfter {
            anchor,
            lines,
            payload,
            ending,
            skip_if_present,
        } => {
            let anchor_line = find_anchor(document, &anchor.compile()?)?;
            let new_lines = insertion_lines(document, anchor_line, lines, payload.as_deref(), *ending)?;
            let outcome = |status| StepOutcome {
                step: number,
                kind: "insert_after",
                status,
                lines: (anchor_line + 1, anchor_line + 1),
            };

            match insert_after_with_edit(document, anchor_line, &new_lines) {
                Ok((next, _)) => Ok((next, outcome(StepStatus::Applied))),
                Err(splice_content::Error::AlreadyInserted { .. }) if *skip_if_present => {
                    Ok((document.clone(), outcome(StepStatus::Skipped)))
                }
                Err(e) => Err(e.into()),
            }
        }
        Step::ReplaceBlock {
            anchor,
            open,
            close,
            payload,
            check_payload,
        } => {
            let mut request = BlockReplace::new(
                anchor.compile()?,
                DelimiterPair::new(open.as_str(), close.as_str())?,
                splice_fs::read_payload(payload)?,
            );
            request.check_payload = *check_payload;

            let replacement = replace_block(document, &request)?;
            let outcome = StepOutcome {
                step: number,
                kind: "replace_block",
                status: StepStatus::Applied,
                lines: replacement.region.line_numbers(),
            };
            Ok((replacement.document, outcome))
        }
    }
}

/// Lines for an insertion: plain strings first, then any payload file.
pub fn insertion_lines(
    document: &Document,
    anchor_line: usize,
    lines: &[String],
    payload: Option<&Path>,
    ending: EndingSpec,
) -> Result<Vec<Line>> {
    let ending = ending.resolve(document, anchor_line);
    let mut new_lines: Vec<Line> = lines
        .iter()
        .map(|text| Line::new(text.as_str(), ending))
        .collect();
    if let Some(path) = payload {
        new_lines.extend(splice_fs::read_payload(path)?);
    }
    if new_lines.is_empty() {
        return Err(CliError::user("nothing to insert: give lines or a payload file"));
    }
    Ok(new_lines)
}
