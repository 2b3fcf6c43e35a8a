//! Workload file discovery

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info};

use crate::error::Result;

/// List every workload definition under `<workload_root>/src/workloads/`.
///
/// Results are sorted so a run visits workloads in a stable order
/// regardless of filesystem iteration order.
pub fn list_workload_files(workload_root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = workload_root
        .join("src")
        .join("workloads")
        .join("**")
        .join("*.yml");
    debug!(pattern = %pattern.display(), "listing workload files");

    let mut files: Vec<PathBuf> = glob(&pattern.to_string_lossy())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();

    info!(count = files.len(), "workload files discovered");
    Ok(files)
}
