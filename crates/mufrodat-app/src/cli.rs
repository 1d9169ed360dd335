use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mufrodat_types::{QuizSource, Theme};

/// Top-level CLI parser for the `mufrodat` binary.
#[derive(Debug, Parser)]
#[command(name = "mufrodat", version, about = "Arabic vocabulary trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Profile to load from the profiles directory
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the saved vocabulary, newest first
    List,
    /// Add a pasted vocabulary block from a file or stdin
    Add {
        /// Read the block from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Let the remote assistant parse the block
        #[arg(long)]
        ai: bool,
    },
    /// Add a single entry
    New(EntryArgs),
    /// Change fields of an existing entry
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete an entry by id
    Delete { id: String },
    /// Multiple choice quiz
    Quiz {
        #[arg(long, value_enum, default_value_t = SourceArg::Newest)]
        source: SourceArg,
        /// Ask the remote assistant for the questions
        #[arg(long)]
        ai: bool,
        /// Number of assistant questions
        #[arg(long, requires = "ai")]
        count: Option<usize>,
    },
    /// Rebuild words from scrambled letters
    Unscramble {
        #[arg(long, value_enum, default_value_t = SourceArg::Newest)]
        source: SourceArg,
    },
    /// Browse shuffled flashcards
    Flashcards,
    /// Show or change display settings
    Settings {
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// Arabic font by catalogue name
        #[arg(long)]
        font: Option<String>,
    },
    /// List the Arabic font catalogue
    Fonts,
}

#[derive(Debug, Args)]
pub struct EntryArgs {
    /// Singular form, or the phrase for an idiom
    #[arg(long)]
    pub singular: String,
    #[arg(long)]
    pub meaning: String,
    #[arg(long, default_value = "")]
    pub dual: String,
    #[arg(long, default_value = "")]
    pub plural: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Store as an Islahul Lughoh phrase
    #[arg(long, conflicts_with_all = ["dual", "plural", "notes"])]
    pub idiom: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub singular: Option<String>,
    #[arg(long)]
    pub meaning: Option<String>,
    #[arg(long)]
    pub dual: Option<String>,
    #[arg(long)]
    pub plural: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Newest,
    Oldest,
    All,
}

impl SourceArg {
    /// Resolve to a slice of `window` entries
    pub fn to_source(self, window: usize) -> QuizSource {
        match self {
            SourceArg::Newest => QuizSource::Newest(window),
            SourceArg::Oldest => QuizSource::Oldest(window),
            SourceArg::All => QuizSource::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}
