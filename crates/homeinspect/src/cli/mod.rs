//! Command-line interface for homeinspect.
//!
//! This module provides the CLI structure for the `hinspect` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, ExportCommand, ExportFormat, ListCommand, OutputFormat,
    StatusCommand,
};

/// hinspect - Room-by-room inspection notes
///
/// Record notes and photos for each room you inspect, then export
/// everything as one paginated report.
#[derive(Debug, Parser)]
#[command(name = "hinspect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
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
    /// Record an observation for a room
    Add(AddCommand),

    /// List recorded entries
    List(ListCommand),

    /// List suggested and recorded rooms
    Rooms,

    /// Compile all entries into a paginated report
    Export(ExportCommand),

    /// Show store status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Debug,
            }
        }
    }
}
