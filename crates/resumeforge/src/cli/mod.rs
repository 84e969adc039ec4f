//! Command-line interface for resumeforge.
//!
//! Every editing command loads the saved record, applies one change and
//! saves it back, so a sequence of commands behaves like one editing session.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    ConfigCommand, EntryCommand, ExportCommand, JsonFlag, PreviewCommand, SectionArg,
    SkillCommand, TemplateArg,
};

/// resumeforge - Build a resume from structured fields
///
/// Edits are saved locally after every command. Preview the result in one
/// of three templates, or export a print-ready document.
#[derive(Debug, Parser)]
#[command(name = "resumeforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the saved record
    Show(JsonFlag),

    /// Show storage and record status
    Status(JsonFlag),

    /// Set a personal field (fullName, email, phone, location, linkedin, github, summary)
    Set {
        /// Field name
        field: String,
        /// New value
        value: String,
    },

    /// Empty the professional summary
    ClearSummary,

    /// Add or remove skills
    #[command(subcommand)]
    Skill(SkillCommand),

    /// Add, remove, edit or clear section entries
    #[command(subcommand)]
    Entry(EntryCommand),

    /// Render the resume as an HTML fragment
    Preview(PreviewCommand),

    /// Print the editor form for one section
    Form {
        /// Section to render
        #[arg(value_enum)]
        section: SectionArg,
    },

    /// Export a print-ready document
    Export(ExportCommand),

    /// Replace the saved record with one read from a JSON file
    Import {
        /// JSON file, e.g. a saved browser record
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the saved record as JSON
    Dump {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Discard the saved record and start over
    New {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
