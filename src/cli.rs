//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `drover`.
#[derive(Debug, Parser)]
#[command(name = "drover", version, about = "Drive an AI coding agent through a YAML task spec")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a starter spec file for a new plan.
    Generate {
        /// Plan name; the spec is written to `<name>.yaml`.
        name: String,
    },
    /// Execute every pending task in a spec.
    Run {
        /// Path to the spec YAML file.
        spec: PathBuf,
    },
    /// Remove the isolated working context for a plan.
    Cleanup {
        /// Plan name whose working context should be released.
        name: String,
    },
}
