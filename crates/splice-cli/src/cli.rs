//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::plan::{EndingSpec, Occurrence};

/// splice - Replace balanced blocks and insert lines in markup-like files
#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// How to find the anchor line
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AnchorArgs {
    /// Text the anchor line contains
    #[arg(short, long)]
    pub anchor: String,

    /// Treat --anchor as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Which match to use: unique, first, nth:<n>, line:<n>
    #[arg(long, default_value = "unique")]
    pub occurrence: Occurrence,
}

/// Block delimiters
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct DelimiterArgs {
    /// Opening marker, counted as a plain substring
    #[arg(long, default_value = "<div")]
    pub open: String,

    /// Closing marker, counted as a plain substring
    #[arg(long, default_value = "</div>")]
    pub close: String,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the line range of the block opened at the anchor
    ///
    /// Examples:
    ///   splice locate page.tsx -a 'bg-slate-900 w-80'
    ///   splice locate page.tsx -a '<section' --open '<section' --close '</section>'
    Locate {
        /// File to inspect
        file: PathBuf,

        #[command(flatten)]
        anchor: AnchorArgs,

        #[command(flatten)]
        delimiters: DelimiterArgs,

        /// Print the block's lines
        #[arg(long)]
        print: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Replace the block opened at the anchor with a payload file
    ///
    /// Examples:
    ///   splice replace page.tsx -a 'bg-slate-900 w-80' --payload sidebar_new.txt
    ///   splice replace page.tsx -a 'bg-slate-900 w-80' --payload sidebar_new.txt --dry-run
    Replace {
        /// File to edit
        file: PathBuf,

        #[command(flatten)]
        anchor: AnchorArgs,

        #[command(flatten)]
        delimiters: DelimiterArgs,

        /// File holding the replacement lines
        #[arg(short, long)]
        payload: PathBuf,

        /// Accept a payload whose delimiters are not balanced
        #[arg(long)]
        no_check_payload: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Insert lines directly after the anchor line
    ///
    /// Refuses to insert when the same lines already follow the anchor.
    ///
    /// Examples:
    ///   splice insert page.tsx -a 'const [showMenu' -l '    const [open, setOpen] = useState(false)'
    Insert {
        /// File to edit
        file: PathBuf,

        #[command(flatten)]
        anchor: AnchorArgs,

        /// Line to insert (repeatable)
        #[arg(short, long = "line")]
        lines: Vec<String>,

        /// File whose lines are inserted after any --line values
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Terminator for --line values
        #[arg(long, value_enum, default_value_t = EndingSpec::Auto)]
        ending: EndingSpec,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Apply an edit plan (TOML, JSON or YAML)
    ///
    /// Steps run in order; the target is written once, only if every step
    /// succeeds.
    Apply {
        /// Plan file
        plan: PathBuf,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   splice completions bash > ~/.local/share/bash-completion/completions/splice
    ///   splice completions zsh > ~/.zfunc/_splice
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
