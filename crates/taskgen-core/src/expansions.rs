//! Build-expansions reader
//!
//! CI hands the generator a flat `expansions.yml` key/value file in
//! the workspace root. Only two keys matter here: `execution` (the
//! invocation counter) and `build_variant` (the variant to select
//! tasks for).

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, TaskgenError};

/// File name of the expansions file inside the workspace root
pub const EXPANSIONS_FILE: &str = "expansions.yml";

/// The subset of build expansions the generator reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Expansions {
    /// Invocation counter; repeated executions do not regenerate tasks
    #[serde(default)]
    pub execution: Option<u64>,
    /// Build variant the current CI task runs on
    #[serde(default)]
    pub build_variant: Option<String>,
}

impl Expansions {
    /// Load expansions from `<workspace_root>/expansions.yml`
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(EXPANSIONS_FILE);
        info!(path = %path.display(), "loading build expansions");

        if !path.exists() {
            return Err(TaskgenError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let expansions: Expansions = serde_yaml::from_str(&content)?;
        debug!(
            execution = ?expansions.execution,
            build_variant = ?expansions.build_variant,
            "expansions loaded"
        );
        Ok(expansions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_expansions() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("expansions.yml"),
            "execution: 0\nbuild_variant: linux-standalone\nother_key: ignored\n",
        )
        .unwrap();

        let expansions = Expansions::load(temp.path()).unwrap();
        assert_eq!(expansions.execution, Some(0));
        assert_eq!(
            expansions.build_variant.as_deref(),
            Some("linux-standalone")
        );
    }

    #[test]
    fn test_load_expansions_partial() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("expansions.yml"), "execution: 2\n").unwrap();

        let expansions = Expansions::load(temp.path()).unwrap();
        assert_eq!(expansions.execution, Some(2));
        assert!(expansions.build_variant.is_none());
    }

    #[test]
    fn test_missing_expansions_file() {
        let temp = TempDir::new().unwrap();
        let err = Expansions::load(temp.path()).unwrap_err();
        assert!(matches!(err, TaskgenError::NotFound(_)));
    }
}
