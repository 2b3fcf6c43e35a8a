//! Task selection: filtering candidate tasks by run mode

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::derive::derive_tasks;
use crate::workload::{ConditionValue, WorkloadDefinition};

/// Condition key whose `$eq` operands name the build variants a task
/// runs on. All other condition keys are ignored by selection.
pub const VARIANT_CONDITION_KEY: &str = "mongodb_setup";

/// How a run decides which candidate tasks to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Every selectable task
    All,
    /// Tasks whose variant set contains the named build variant
    Variant(String),
    /// Tasks whose workload file is in the modified set (patch mode)
    Modified(BTreeSet<String>),
}

/// A task chosen for the output manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedTask {
    /// Task name
    pub name: String,
    /// Build variants the task applies to; may be empty
    pub runs_on_variants: Vec<String>,
    /// Bootstrap variables handed to the scheduler; always carries
    /// `name` and `path` entries
    pub bootstrap_vars: BTreeMap<String, String>,
}

/// Select the tasks that should run for the given mode.
///
/// Workloads are visited in the order given; each workload's tasks
/// keep their derivation order. Tasks from workloads without any
/// `AutoRun` block are never selectable; a workload that declared no
/// `When` condition has opted out of scheduler-targeted output.
pub fn select_tasks(workloads: &[WorkloadDefinition], mode: &SelectionMode) -> Vec<SelectedTask> {
    if let SelectionMode::Modified(modified) = mode {
        info!(modified = modified.len(), "selecting tasks for modified workloads");
    }

    let mut selected = Vec::new();
    for workload in workloads {
        if workload.auto_run.is_none() {
            continue;
        }
        let variants = workload_variants(workload);

        for task in derive_tasks(workload) {
            let included = match mode {
                SelectionMode::All => true,
                SelectionMode::Variant(variant) => variants.contains(variant),
                SelectionMode::Modified(modified) => modified.contains(&workload.relative_path),
            };
            debug!(task = %task.name, included, "selection decision");
            if !included {
                continue;
            }

            let mut bootstrap_vars = BTreeMap::new();
            bootstrap_vars.insert("name".to_string(), task.name.clone());
            bootstrap_vars.insert("path".to_string(), workload.relative_path.clone());
            if let (Some(key), Some(value)) = (&task.bootstrap_key, &task.bootstrap_value) {
                bootstrap_vars.insert(key.clone(), value.clone());
            }

            selected.push(SelectedTask {
                name: task.name.clone(),
                runs_on_variants: variants.clone(),
                bootstrap_vars,
            });
        }
    }

    info!(selected = selected.len(), "task selection complete");
    selected
}

/// Collect the variants a workload's tasks run on: the union of
/// `mongodb_setup` `$eq` operands across all of the workload's blocks,
/// in declared order.
///
/// The set is deliberately scoped to the whole workload rather than
/// the block that produced a given task; existing consumers depend on
/// that attribution.
fn workload_variants(workload: &WorkloadDefinition) -> Vec<String> {
    let mut variants = Vec::new();
    for block in workload.auto_run.iter().flatten() {
        for (key, condition) in &block.when {
            if key != VARIANT_CONDITION_KEY {
                continue;
            }
            if let ConditionValue::Equals(values) = condition {
                for value in values {
                    if !variants.contains(value) {
                        variants.push(value.clone());
                    }
                }
            }
        }
    }
    variants
}
