//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::entry::{Checklist, NewEntry, PhotoRef};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Room the observation belongs to (any label)
    pub room: String,

    /// Inspection notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Photo reference (file path or data URI)
    #[arg(short, long)]
    pub photo: Option<String>,

    /// Checklist item (repeatable)
    #[arg(long = "check", value_name = "ITEM")]
    pub checklist: Vec<String>,
}

impl AddCommand {
    /// Build the entry draft described by the arguments.
    #[must_use]
    pub fn to_new_entry(&self) -> NewEntry {
        let mut draft = NewEntry::new(self.room.clone());
        if let Some(notes) = &self.notes {
            draft = draft.with_notes(notes.clone());
        }
        if let Some(photo) = &self.photo {
            draft = draft.with_photo(PhotoRef::new(photo.clone()));
        }
        if !self.checklist.is_empty() {
            draft = draft.with_checklist(self.checklist.iter().cloned().collect::<Checklist>());
        }
        draft
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show entries for this room (exact match)
    #[arg(short, long)]
    pub room: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ExportFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
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

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

/// Format of an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Paginated plain text
    #[default]
    Text,
    /// The compiled document as JSON, for external renderers
    Json,
}
