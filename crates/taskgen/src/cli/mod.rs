//! CLI definition and command handling

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{AllCommand, PatchCommand, VariantCommand};

/// Taskgen - auto-task manifest generator
#[derive(Debug, Parser)]
#[command(name = "taskgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Workspace root (where expansions.yml lives and build output goes)
    #[arg(long, global = true, default_value = ".")]
    pub workspace_root: PathBuf,

    /// Root of the repository holding src/workloads/
    #[arg(long, global = true, default_value = ".")]
    pub workload_root: PathBuf,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate every selectable task
    All(AllCommand),

    /// Generate tasks for the build variant named in expansions.yml
    Variant(VariantCommand),

    /// Generate tasks for workloads modified relative to upstream
    Patch(PatchCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::All(ref cmd) => cmd.execute(&self),
            Commands::Variant(ref cmd) => cmd.execute(&self),
            Commands::Patch(ref cmd) => cmd.execute(&self),
        }
    }
}
