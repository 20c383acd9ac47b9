//! Anchor line matching
//!
//! An anchor is a per-line predicate plus a rule for how many lines may
//! match it. Matching is line-granular: a pattern is run against one
//! line's text at a time and never sees a line terminator or a
//! neighbouring line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::document::Document;
use crate::error::{Error, Result};

/// Predicate over a single line's text.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Line contains this substring
    Literal(String),
    /// Line matches this regular expression
    Pattern(Regex),
}

impl Matcher {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a regular expression matcher.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(needle) => text.contains(needle.as_str()),
            Self::Pattern(regex) => regex.is_match(text),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(needle) => write!(f, "{needle:?}"),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// How many matching lines an anchor accepts, and which one it selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Exactly one line in the document may match
    #[default]
    ExactlyOne,
    /// The first matching line
    First,
    /// The n-th matching line, 0-based
    Nth(usize),
    /// The line at this 0-based index, which must also match
    AtLine(usize),
}

/// A line predicate with a cardinality.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub matcher: Matcher,
    pub cardinality: Cardinality,
}

impl Anchor {
    pub fn new(matcher: Matcher, cardinality: Cardinality) -> Self {
        Self {
            matcher,
            cardinality,
        }
    }

    /// Literal anchor that must match exactly one line.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(Matcher::literal(text), Cardinality::ExactlyOne)
    }

    /// Pattern anchor that must match exactly one line.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::new(Matcher::pattern(pattern)?, Cardinality::ExactlyOne))
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn first(self) -> Self {
        self.with_cardinality(Cardinality::First)
    }

    pub fn nth(self, n: usize) -> Self {
        self.with_cardinality(Cardinality::Nth(n))
    }

    pub fn at_line(self, index: usize) -> Self {
        self.with_cardinality(Cardinality::AtLine(index))
    }

    fn describe(&self) -> String {
        match self.cardinality {
            Cardinality::ExactlyOne | Cardinality::First => self.matcher.to_string(),
            Cardinality::Nth(n) => format!("{} (match #{})", self.matcher, n + 1),
            Cardinality::AtLine(i) => format!("{} at line {}", self.matcher, i + 1),
        }
    }
}

/// Indices of every line whose text satisfies `matcher`.
pub fn find_all(document: &Document, matcher: &Matcher) -> Vec<usize> {
    document
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| matcher.is_match(&line.text))
        .map(|(index, _)| index)
        .collect()
}

/// Resolve an anchor to a single line index.
pub fn find_anchor(document: &Document, anchor: &Anchor) -> Result<usize> {
    let not_found = || Error::AnchorNotFound {
        anchor: anchor.describe(),
    };

    let found = match anchor.cardinality {
        Cardinality::ExactlyOne => {
            let matches = find_all(document, &anchor.matcher);
            match matches.as_slice() {
                [index] => *index,
                _ => {
                    return Err(Error::AmbiguousAnchor {
                        anchor: anchor.describe(),
                        matches: matches.len(),
                    });
                }
            }
        }
        Cardinality::First => document
            .lines()
            .iter()
            .position(|line| anchor.matcher.is_match(&line.text))
            .ok_or_else(not_found)?,
        Cardinality::Nth(n) => document
            .lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| anchor.matcher.is_match(&line.text))
            .nth(n)
            .map(|(index, _)| index)
            .ok_or_else(not_found)?,
        Cardinality::AtLine(index) => match document.line(index) {
            Some(line) if anchor.matcher.is_match(&line.text) => index,
            _ => return Err(not_found()),
        },
    };

    debug!(anchor = %anchor.matcher, line = found, "anchor resolved");
    Ok(found)
}
