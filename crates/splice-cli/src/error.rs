//! Error types for splice-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from splice-content
    #[error(transparent)]
    Content(#[from] splice_content::Error),

    /// Error from splice-fs
    #[error(transparent)]
    Fs(#[from] splice_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Failure inside one step of an edit plan (1-based)
    #[error("step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: Box<CliError>,
    },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Wrap an error with the plan step it came from.
    pub fn in_step(self, step: usize) -> Self {
        Self::Step {
            step,
            source: Box::new(self),
        }
    }

    /// Short name of the error kind, reported alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Content(e) => e.code(),
            Self::Fs(splice_fs::Error::ConfigParse { .. })
            | Self::Fs(splice_fs::Error::UnsupportedFormat { .. }) => "config",
            Self::Fs(_) | Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Step { source, .. } => source.code(),
            Self::User { .. } => "usage",
        }
    }
}
