//! Manifest rendering and output writing

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::context::RunContext;
use crate::error::Result;
use crate::select::SelectedTask;

/// Schema tag stamped into every generated manifest
pub const TASK_GENERATOR_VERSION: &str = "v1.0";

/// The document handed to the external scheduler
#[derive(Debug, Clone, Serialize)]
pub struct TaskManifest {
    /// Constant schema version
    pub version: &'static str,
    /// Selected tasks, in selection order
    pub tasks: Vec<SelectedTask>,
}

impl TaskManifest {
    /// Wrap selected tasks into a versioned manifest
    pub fn new(tasks: Vec<SelectedTask>) -> Self {
        Self {
            version: TASK_GENERATOR_VERSION,
            tasks,
        }
    }

    /// Render the manifest as a YAML document
    pub fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Writes a manifest to its well-known location under the workspace
/// build directory.
pub struct ManifestWriter<'a> {
    context: &'a RunContext,
}

impl<'a> ManifestWriter<'a> {
    /// Create a writer for the given run
    pub fn new(context: &'a RunContext) -> Self {
        Self { context }
    }

    /// Output path, derived from the workload root's base name
    pub fn output_path(&self) -> PathBuf {
        let repo_name = self
            .context
            .workload_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workloads".to_string());
        self.context
            .workspace_root
            .join("build")
            .join("TaskManifests")
            .join(format!("Tasks-{repo_name}.yml"))
    }

    /// Write the manifest, replacing any previous file at the target
    /// path. The write is all-or-nothing: the old file is removed
    /// first and the rendered document written as a whole.
    pub fn write(&self, manifest: &TaskManifest) -> Result<PathBuf> {
        let output_path = self.output_path();
        let text = manifest.render()?;

        let result = self.write_text(&output_path, &text);

        // The original file may already be gone when the write itself
        // fails; the log line names the effective cwd because CI runs
        // this from varying directories.
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        match &result {
            Ok(()) => info!(
                path = %output_path.display(),
                cwd = %cwd,
                tasks = manifest.tasks.len(),
                "wrote task manifest"
            ),
            Err(err) => error!(
                path = %output_path.display(),
                cwd = %cwd,
                error = %err,
                "failed to write task manifest"
            ),
        }
        if let Some(execution) = self.context.execution {
            if execution != 0 {
                warn!(execution, "repeated executions will not re-generate tasks");
            }
        }

        result?;
        Ok(output_path)
    }

    fn write_text(&self, output_path: &std::path::Path, text: &str) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if output_path.exists() {
            std::fs::remove_file(output_path)?;
        }
        std::fs::write(output_path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample_task(name: &str) -> SelectedTask {
        let mut bootstrap_vars = BTreeMap::new();
        bootstrap_vars.insert("name".to_string(), name.to_string());
        bootstrap_vars.insert(
            "path".to_string(),
            "src/workloads/scale/InsertRemove.yml".to_string(),
        );
        SelectedTask {
            name: name.to_string(),
            runs_on_variants: vec!["standalone".to_string()],
            bootstrap_vars,
        }
    }

    #[test]
    fn test_render_schema() {
        let manifest = TaskManifest::new(vec![sample_task("insert_remove")]);
        let text = manifest.render().unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value["version"].as_str(), Some("v1.0"));
        let tasks = value["tasks"].as_sequence().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["name"].as_str(), Some("insert_remove"));
        assert_eq!(
            tasks[0]["runs_on_variants"][0].as_str(),
            Some("standalone")
        );
        assert_eq!(
            tasks[0]["bootstrap_vars"]["path"].as_str(),
            Some("src/workloads/scale/InsertRemove.yml")
        );
    }

    #[test]
    fn test_output_path_uses_workload_repo_name() {
        let context = RunContext::new("/workspace", "/workspace/src/perf");
        let writer = ManifestWriter::new(&context);
        assert_eq!(
            writer.output_path(),
            PathBuf::from("/workspace/build/TaskManifests/Tasks-perf.yml")
        );
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let context = RunContext::new(temp.path(), temp.path().join("perf"));
        let writer = ManifestWriter::new(&context);

        let target = writer.output_path();
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, "stale contents").unwrap();

        let written = writer
            .write(&TaskManifest::new(vec![sample_task("insert_remove")]))
            .unwrap();
        assert_eq!(written, target);

        let contents = std::fs::read_to_string(&target).unwrap();
        assert!(contents.contains("version: v1.0"));
        assert!(contents.contains("insert_remove"));
        assert!(!contents.contains("stale contents"));
    }

    #[test]
    fn test_write_creates_build_directories() {
        let temp = TempDir::new().unwrap();
        let context = RunContext::new(temp.path(), temp.path().join("perf"));
        let writer = ManifestWriter::new(&context);

        let written = writer.write(&TaskManifest::new(vec![])).unwrap();
        assert!(written.exists());
    }
}
