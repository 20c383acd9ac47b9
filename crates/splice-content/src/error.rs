//! Error types for splice-content

/// Result type for splice-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or splicing regions.
///
/// Line numbers in messages are 1-based; the fields themselves hold
/// 0-based indices.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Anchor not found: {anchor}")]
    AnchorNotFound { anchor: String },

    #[error("Anchor {anchor} must match exactly one line, found {matches}")]
    AmbiguousAnchor { anchor: String, matches: usize },

    #[error(
        "Unbalanced structure: block opened at line {} is still {depth} level(s) deep at end of document",
        .start + 1
    )]
    UnbalancedStructure { start: usize, depth: i64 },

    #[error("Content already present after line {}", .line + 1)]
    AlreadyInserted { line: usize },

    #[error("Payload is not delimiter-balanced (net depth {depth})")]
    PayloadImbalance { depth: i64 },

    #[error("Line {} does not open a block", .line + 1)]
    NotBlockOpener { line: usize },

    #[error("Line index {line} is out of range for a document of {len} lines")]
    LineOutOfRange { line: usize, len: usize },

    #[error("Invalid region [{start}, {end}]: {reason}")]
    InvalidRegion {
        start: usize,
        end: usize,
        reason: String,
    },

    #[error("Region [{start}, {end}] was computed against a different document snapshot")]
    StaleRegion { start: usize, end: usize },

    #[error("Edit does not apply: line {} differs from the recorded content", .line + 1)]
    EditConflict { line: usize },

    #[error("Invalid delimiter pair: {reason}")]
    InvalidDelimiter { reason: String },

    #[error("Invalid anchor pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl Error {
    /// Stable machine-readable name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AnchorNotFound { .. } => "anchor_not_found",
            Self::AmbiguousAnchor { .. } => "ambiguous_anchor",
            Self::UnbalancedStructure { .. } => "unbalanced_structure",
            Self::AlreadyInserted { .. } => "already_inserted",
            Self::PayloadImbalance { .. } => "payload_imbalance",
            Self::NotBlockOpener { .. } => "not_block_opener",
            Self::LineOutOfRange { .. } => "line_out_of_range",
            Self::InvalidRegion { .. } => "invalid_region",
            Self::StaleRegion { .. } => "stale_region",
            Self::EditConflict { .. } => "edit_conflict",
            Self::InvalidDelimiter { .. } => "invalid_delimiter",
            Self::InvalidPattern { .. } => "invalid_pattern",
        }
    }

    pub fn invalid_region(start: usize, end: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRegion {
            start,
            end,
            reason: reason.into(),
        }
    }
}
