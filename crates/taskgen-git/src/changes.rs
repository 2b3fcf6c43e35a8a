//! Modified workload files via the git CLI

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use taskgen_core::error::{Result, TaskgenError};

/// List workload files modified relative to the upstream merge base.
///
/// Diffs added/modified/renamed files under `src/workloads/` against
/// `git merge-base HEAD origin`, keeping only YAML files. Paths in the
/// returned set are relative to `workload_root`. The git processes run
/// with their own working directory; the caller's cwd is never
/// touched.
pub fn modified_workload_files(workload_root: &Path) -> Result<BTreeSet<String>> {
    let merge_base = run_git(workload_root, &["merge-base", "HEAD", "origin"])?;
    let merge_base = merge_base.trim();
    debug!(merge_base, "resolved upstream merge base");

    let diff = run_git(
        workload_root,
        &[
            "diff",
            "--name-only",
            "--diff-filter=AMR",
            merge_base,
            "--",
            "src/workloads/",
        ],
    )?;

    let modified = workload_paths_from_diff(&diff);
    info!(
        workload_root = %workload_root.display(),
        modified = modified.len(),
        "modified workload files detected"
    );
    Ok(modified)
}

fn run_git(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").current_dir(root).args(args).output()?;

    if !output.status.success() {
        return Err(TaskgenError::ExternalTool {
            command: format!("git {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extract workload paths from `git diff --name-only` output, keeping
/// only YAML files.
fn workload_paths_from_diff(stdout: &str) -> BTreeSet<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.ends_with(".yml"))
        .map(String::from)
        .collect()
}
