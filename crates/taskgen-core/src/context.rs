//! Per-run configuration

use std::path::PathBuf;

/// Immutable description of one generator invocation.
///
/// Constructed once at the start of a run and passed by reference to
/// every component; nothing mutates it afterward.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Effective working directory for the run
    pub workspace_root: PathBuf,
    /// Root of the repository holding `src/workloads/`
    pub workload_root: PathBuf,
    /// Build variant to select for, if any
    pub variant: Option<String>,
    /// Restrict selection to workload files modified in the patch
    pub patch_mode: bool,
    /// CI invocation counter, when known
    pub execution: Option<u64>,
}

impl RunContext {
    /// Create a context that selects every task
    pub fn new(workspace_root: impl Into<PathBuf>, workload_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            workload_root: workload_root.into(),
            variant: None,
            patch_mode: false,
            execution: None,
        }
    }

    /// Restrict the run to a named build variant
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Restrict the run to modified workload files
    pub fn with_patch_mode(mut self, patch_mode: bool) -> Self {
        self.patch_mode = patch_mode;
        self
    }

    /// Record the CI invocation counter
    pub fn with_execution(mut self, execution: u64) -> Self {
        self.execution = Some(execution);
        self
    }
}
