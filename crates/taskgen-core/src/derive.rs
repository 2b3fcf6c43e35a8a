//! Task derivation: expanding a workload into named candidate tasks

use std::cmp::Ordering;

use regex::Regex;
use tracing::debug;

use crate::workload::WorkloadDefinition;

/// A task a workload could contribute, before selection.
///
/// Holds a non-owning reference to the workload that produced it; a
/// candidate never outlives the run in which its workload was parsed.
#[derive(Debug, Clone)]
pub struct CandidateTask<'a> {
    /// Generated task name
    pub name: String,
    /// Bootstrap variable name, when the task came from a `ThenRun` pair
    pub bootstrap_key: Option<String>,
    /// Bootstrap variable value, when the task came from a `ThenRun` pair
    pub bootstrap_value: Option<String>,
    /// The workload that produced this task
    pub workload: &'a WorkloadDefinition,
}

impl CandidateTask<'_> {
    fn sort_key(&self) -> (&str, Option<&str>, Option<&str>, &str) {
        (
            &self.name,
            self.bootstrap_key.as_deref(),
            self.bootstrap_value.as_deref(),
            &self.workload.relative_path,
        )
    }
}

impl PartialEq for CandidateTask<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for CandidateTask<'_> {}

impl PartialOrd for CandidateTask<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateTask<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Expand a workload into its candidate tasks.
///
/// A workload without `AutoRun` blocks contributes exactly one task
/// named after the file; a block with an empty `ThenRun` contributes
/// the base task; every `ThenRun` pair contributes one
/// `<base>_<snake(value)>` task carrying that pair. The result is
/// deduplicated and sorted: two blocks that both request the base task
/// must not name it twice, and the scheduler rejects duplicate task
/// names.
pub fn derive_tasks(workload: &WorkloadDefinition) -> Vec<CandidateTask<'_>> {
    let base = base_name(workload);

    let Some(blocks) = &workload.auto_run else {
        return vec![base_task(base, workload)];
    };

    let mut tasks = Vec::new();
    for block in blocks {
        if block.then_run.is_empty() {
            tasks.push(base_task(base.clone(), workload));
        }
        for (key, value) in &block.then_run {
            tasks.push(CandidateTask {
                name: format!("{base}_{}", to_snake_case(value)),
                bootstrap_key: Some(key.clone()),
                bootstrap_value: Some(value.clone()),
                workload,
            });
        }
    }

    tasks.sort();
    tasks.dedup();
    debug!(
        workload = %workload.relative_path,
        tasks = tasks.len(),
        "derived candidate tasks"
    );
    tasks
}

fn base_task(name: String, workload: &WorkloadDefinition) -> CandidateTask<'_> {
    CandidateTask {
        name,
        bootstrap_key: None,
        bootstrap_value: None,
        workload,
    }
}

/// Compute a workload's snake-case base name from its path below
/// `src/workloads/`.
///
/// The first path segment is the legacy top-level grouping directory
/// and is not part of the name, unless the file sits directly under
/// the workloads root and that single segment is all there is.
pub fn base_name(workload: &WorkloadDefinition) -> String {
    let stem = workload
        .subpath
        .strip_suffix(".yml")
        .or_else(|| workload.subpath.rsplit_once('.').map(|(stem, _)| stem))
        .unwrap_or(&workload.subpath);

    let segments: Vec<&str> = stem.split('/').collect();
    if segments.len() == 1 {
        to_snake_case(segments[0])
    } else {
        segments[1..]
            .iter()
            .map(|segment| to_snake_case(segment))
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Convert CamelCase (and dashed) names to snake_case.
///
/// Idempotent on input that is already snake_case.
pub fn to_snake_case(name: &str) -> String {
    let upper_word = Regex::new(r"(.)([A-Z][a-z]+)").unwrap();
    let boundary = Regex::new(r"([a-z0-9])([A-Z])").unwrap();

    let with_word_breaks = upper_word.replace_all(name, "${1}_${2}");
    let dashless = with_word_breaks.replace('-', "_");
    boundary.replace_all(&dashless, "${1}_${2}").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::AutoRunBlock;
    use std::path::PathBuf;

    fn workload(subpath: &str, auto_run: Option<Vec<AutoRunBlock>>) -> WorkloadDefinition {
        WorkloadDefinition {
            path: PathBuf::from(format!("src/workloads/{subpath}")),
            relative_path: format!("src/workloads/{subpath}"),
            subpath: subpath.to_string(),
            auto_run,
        }
    }

    fn block(then_run: Vec<(&str, &str)>) -> AutoRunBlock {
        AutoRunBlock {
            when: vec![("x".to_string(), crate::workload::ConditionValue::Other)],
            then_run: then_run
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("NestedWorkload"), "nested_workload");
        assert_eq!(to_snake_case("InsertRemove"), "insert_remove");
        assert_eq!(to_snake_case("my-workload"), "my_workload");
        assert_eq!(to_snake_case("CamelABCCase"), "camel_abc_case");
    }

    #[test]
    fn test_to_snake_case_idempotent() {
        for name in ["insert_remove", "nested_workload", "plain"] {
            assert_eq!(to_snake_case(&to_snake_case(name)), to_snake_case(name));
        }
    }

    #[test]
    fn test_base_name_drops_grouping_directory() {
        assert_eq!(base_name(&workload("scale/InsertRemove.yml", None)), "insert_remove");
        assert_eq!(
            base_name(&workload("scale/NestedDir/MyWorkload.yml", None)),
            "nested_dir_my_workload"
        );
    }

    #[test]
    fn test_base_name_single_segment_keeps_file_name() {
        assert_eq!(base_name(&workload("TopLevel.yml", None)), "top_level");
    }

    #[test]
    fn test_no_auto_run_yields_single_base_task() {
        // Scenario: scale/InsertRemove.yml without AutoRun.
        let workload = workload("scale/InsertRemove.yml", None);
        let tasks = derive_tasks(&workload);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "insert_remove");
        assert!(tasks[0].bootstrap_key.is_none());
        assert!(tasks[0].bootstrap_value.is_none());
    }

    #[test]
    fn test_then_run_pairs_yield_suffixed_tasks() {
        let workload = workload(
            "scale/MyTest.yml",
            Some(vec![block(vec![("bootstrap_key", "a"), ("bootstrap_key", "b")])]),
        );
        let tasks = derive_tasks(&workload);
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["my_test_a", "my_test_b"]);
        assert_eq!(tasks[0].bootstrap_key.as_deref(), Some("bootstrap_key"));
        assert_eq!(tasks[0].bootstrap_value.as_deref(), Some("a"));
    }

    #[test]
    fn test_empty_then_run_yields_base_task() {
        let workload = workload("scale/MyTest.yml", Some(vec![block(vec![])]));
        let tasks = derive_tasks(&workload);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "my_test");
        assert!(tasks[0].bootstrap_key.is_none());
    }

    #[test]
    fn test_duplicate_base_tasks_are_deduplicated() {
        // Two blocks that both request the base task name it once.
        let workload = workload("scale/MyTest.yml", Some(vec![block(vec![]), block(vec![])]));
        let tasks = derive_tasks(&workload);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "my_test");
    }

    #[test]
    fn test_tasks_are_sorted_deterministically() {
        let workload = workload(
            "scale/MyTest.yml",
            Some(vec![block(vec![("k", "b"), ("k", "a")])]),
        );
        let names: Vec<String> = derive_tasks(&workload).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["my_test_a", "my_test_b"]);
    }

    #[test]
    fn test_bootstrap_value_is_snake_cased_in_name() {
        let workload = workload(
            "scale/MyTest.yml",
            Some(vec![block(vec![("mode", "WithLongerRuntime")])]),
        );
        let tasks = derive_tasks(&workload);
        assert_eq!(tasks[0].name, "my_test_with_longer_runtime");
        // The carried value stays as declared.
        assert_eq!(tasks[0].bootstrap_value.as_deref(), Some("WithLongerRuntime"));
    }
}
