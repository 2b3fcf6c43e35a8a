//! Taskgen Core - auto-task derivation for CI scheduling
//!
//! This crate turns declarative workload definitions into a task
//! manifest: it discovers workload YAML files, validates their
//! `AutoRun` sections, derives named candidate tasks, filters them by
//! selection mode, and renders the manifest the external scheduler
//! consumes.

pub mod context;
pub mod derive;
pub mod discovery;
pub mod error;
pub mod expansions;
pub mod manifest;
pub mod select;
pub mod workload;

pub use context::RunContext;
pub use derive::{base_name, derive_tasks, to_snake_case, CandidateTask};
pub use discovery::list_workload_files;
pub use error::{Result, SchemaError, TaskgenError};
pub use expansions::{Expansions, EXPANSIONS_FILE};
pub use manifest::{ManifestWriter, TaskManifest, TASK_GENERATOR_VERSION};
pub use select::{select_tasks, SelectedTask, SelectionMode, VARIANT_CONDITION_KEY};
pub use workload::{AutoRunBlock, ConditionValue, WorkloadDefinition};
