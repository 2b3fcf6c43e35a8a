//! Manifest generation commands (all / variant / patch)

use anyhow::Context as _;
use clap::Args;
use console::style;
use tracing::info;

use taskgen_core::{
    list_workload_files, select_tasks, Expansions, ManifestWriter, RunContext, SelectionMode,
    TaskManifest, WorkloadDefinition,
};

use crate::cli::Cli;

/// Generate every selectable task
#[derive(Debug, Args)]
pub struct AllCommand {}

/// Generate tasks for the current build variant
#[derive(Debug, Args)]
pub struct VariantCommand {}

/// Generate tasks for modified workloads
#[derive(Debug, Args)]
pub struct PatchCommand {}

impl AllCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("generating all tasks");
        let context = RunContext::new(&cli.workspace_root, &cli.workload_root);
        generate(cli, &context, SelectionMode::All)
    }
}

impl VariantCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let expansions = Expansions::load(&cli.workspace_root)?;
        let variant = expansions
            .build_variant
            .clone()
            .context("expansions.yml does not define build_variant")?;
        info!(variant = %variant, "generating tasks for build variant");

        let mut context = RunContext::new(&cli.workspace_root, &cli.workload_root)
            .with_variant(variant.as_str());
        if let Some(execution) = expansions.execution {
            context = context.with_execution(execution);
        }
        generate(cli, &context, SelectionMode::Variant(variant))
    }
}

impl PatchCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let modified = taskgen_git::modified_workload_files(&cli.workload_root)?;
        info!(modified = modified.len(), "generating tasks for patch");

        let context =
            RunContext::new(&cli.workspace_root, &cli.workload_root).with_patch_mode(true);
        generate(cli, &context, SelectionMode::Modified(modified))
    }
}

/// Shared run: discover, parse, select, write. Fail-fast throughout;
/// a malformed workload aborts the whole run rather than skipping the
/// file.
fn generate(cli: &Cli, context: &RunContext, mode: SelectionMode) -> anyhow::Result<()> {
    let files = list_workload_files(&context.workload_root)?;

    let mut workloads = Vec::with_capacity(files.len());
    for file in &files {
        workloads.push(WorkloadDefinition::load(file, &context.workload_root)?);
    }

    let tasks = select_tasks(&workloads, &mode);
    let manifest = TaskManifest::new(tasks);

    let writer = ManifestWriter::new(context);
    let output_path = writer.write(&manifest)?;

    if !cli.quiet {
        println!(
            "{} Wrote {} tasks for {} workloads to {}",
            style("✓").green(),
            style(manifest.tasks.len()).cyan(),
            style(workloads.len()).cyan(),
            style(output_path.display()).cyan()
        );
    }
    Ok(())
}
