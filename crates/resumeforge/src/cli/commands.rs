//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::Section;
use crate::render::Template;

/// Arguments for commands that can print JSON.
#[derive(Debug, Args)]
pub struct JsonFlag {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Skill commands.
#[derive(Debug, Subcommand)]
pub enum SkillCommand {
    /// Add one or more comma-separated skills
    Add {
        /// Skills, e.g. "Rust, SQL, Docker"
        input: String,
    },

    /// Remove a skill
    Remove {
        /// The skill, exactly as stored
        skill: String,
    },
}

/// Entry commands for the repeatable sections.
#[derive(Debug, Subcommand)]
pub enum EntryCommand {
    /// Append a blank entry
    Add {
        /// Section to add to
        #[arg(value_enum)]
        section: SectionArg,
    },

    /// Remove an entry; later entries move up
    Remove {
        /// Section to remove from
        #[arg(value_enum)]
        section: SectionArg,
        /// Zero-based entry index
        index: usize,
    },

    /// Set one field of an entry
    Set {
        /// Section of the entry
        #[arg(value_enum)]
        section: SectionArg,
        /// Zero-based entry index (the entry count appends a new entry)
        index: usize,
        /// Field name, e.g. jobTitle or degree
        field: String,
        /// New value
        value: String,
    },

    /// Replace a section with a single blank entry
    Clear {
        /// Section to clear
        #[arg(value_enum)]
        section: SectionArg,
    },
}

/// Preview command arguments.
#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Template to render with (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub template: Option<TemplateArg>,

    /// Write the fragment to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Template to render with (defaults to the configured one)
    #[arg(short, long, value_enum)]
    pub template: Option<TemplateArg>,

    /// Directory to write the document to (defaults to the configured one)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Template argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateArg {
    /// Plain section titles
    Classic,
    /// Icons in front of section titles
    Modern,
    /// Sparse, no icons
    Minimal,
}

impl From<TemplateArg> for Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Classic => Self::Classic,
            TemplateArg::Modern => Self::Modern,
            TemplateArg::Minimal => Self::Minimal,
        }
    }
}

/// Section argument. Singular forms are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    /// Education entries
    Education,
    /// Work experience entries
    Experience,
    /// Project entries
    #[value(alias = "project")]
    Projects,
    /// Achievements and certifications
    #[value(alias = "achievement")]
    Achievements,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Education => Self::Education,
            SectionArg::Experience => Self::Experience,
            SectionArg::Projects => Self::Projects,
            SectionArg::Achievements => Self::Achievements,
        }
    }
}
