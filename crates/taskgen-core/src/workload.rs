//! Workload definition parsing and validation
//!
//! A workload is a YAML file under `src/workloads/` that may carry a
//! top-level `AutoRun` section: a sequence of `When`/`ThenRun` blocks
//! describing the conditions under which generated tasks should run.
//! Parsing validates the section's structure up front so everything
//! downstream can assume a well-formed definition.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::info;

use crate::error::{yaml_type_name, Result, SchemaError, TaskgenError};

/// Path component every workload file must live under
pub const WORKLOADS_DIR: &str = "src/workloads/";

/// A parsed workload definition file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDefinition {
    /// Path as discovered on disk
    pub path: PathBuf,
    /// Path relative to the workload root, `/`-separated
    pub relative_path: String,
    /// Portion of the path below `src/workloads/`, extension kept
    pub subpath: String,
    /// The `When`/`ThenRun` blocks, if the file declares any
    pub auto_run: Option<Vec<AutoRunBlock>>,
}

/// One `When`/`ThenRun` pair from an `AutoRun` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRunBlock {
    /// Condition key to condition expression, declared order
    pub when: Vec<(String, ConditionValue)>,
    /// (bootstrap key, bootstrap value) pairs, declared order; may be empty
    pub then_run: Vec<(String, String)>,
}

/// A condition expression from a `When` mapping.
///
/// Only the `$eq` operator is interpreted; any other operator, and any
/// non-mapping expression, is carried as `Other` and ignored by
/// selection. Workload authors rely on that permissiveness for
/// conditions the generator does not understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    /// `$eq` operand, flattened to a list of scalar strings
    Equals(Vec<String>),
    /// Unrecognized operator or non-mapping expression
    Other,
}

impl WorkloadDefinition {
    /// Read and parse a workload file from disk
    pub fn load(path: &Path, workload_root: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TaskgenError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let raw: Value = serde_yaml::from_str(&content)?;
        Self::parse(&raw, path, workload_root)
    }

    /// Validate raw workload content and extract its `AutoRun` metadata
    pub fn parse(raw: &Value, path: &Path, workload_root: &Path) -> Result<Self> {
        let (relative_path, subpath) = relative_workload_path(path, workload_root)?;
        info!(path = %path.display(), "inspecting workload for auto-run tasks");

        let Some(auto_run) = raw.get("AutoRun") else {
            return Ok(Self {
                path: path.to_path_buf(),
                relative_path,
                subpath,
                auto_run: None,
            });
        };

        let blocks = auto_run
            .as_sequence()
            .ok_or_else(|| SchemaError::AutoRunNotSequence {
                path: path.to_path_buf(),
                found: yaml_type_name(auto_run).to_string(),
            })?;
        if blocks.is_empty() {
            return Err(SchemaError::AutoRunEmpty {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mut parsed = Vec::with_capacity(blocks.len());
        for (index, block) in blocks.iter().enumerate() {
            parsed.push(parse_block(block, index, path)?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            relative_path,
            subpath,
            auto_run: Some(parsed),
        })
    }
}

/// Compute the workload-root-relative path and the `src/workloads/`
/// subpath for a workload file.
fn relative_workload_path(path: &Path, workload_root: &Path) -> Result<(String, String)> {
    let relative = path.strip_prefix(workload_root).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");

    let parts: Vec<&str> = relative.split(WORKLOADS_DIR).collect();
    if parts.len() != 2 {
        return Err(SchemaError::InvalidWorkloadPath {
            path: path.to_path_buf(),
        }
        .into());
    }
    let subpath = parts[1];
    if subpath.is_empty() {
        return Err(SchemaError::InvalidWorkloadPath {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok((relative.to_string(), subpath.to_string()))
}

fn parse_block(block: &Value, index: usize, path: &Path) -> Result<AutoRunBlock> {
    let mapping = block.as_mapping().ok_or_else(|| SchemaError::InvalidWhen {
        path: path.to_path_buf(),
        index,
        found: yaml_type_name(block).to_string(),
    })?;

    let when = mapping
        .get("When")
        .and_then(Value::as_mapping)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| SchemaError::InvalidWhen {
            path: path.to_path_buf(),
            index,
            found: match mapping.get("When") {
                Some(value) => yaml_type_name(value).to_string(),
                None => "a block without 'When'".to_string(),
            },
        })?;

    let when = when
        .iter()
        .filter_map(|(key, expression)| {
            // Non-string condition keys can never match the reserved
            // key, so there is nothing to carry for them.
            let key = key.as_str()?;
            Some((key.to_string(), parse_condition(expression)))
        })
        .collect();

    let then_run = match mapping.get("ThenRun") {
        None => Vec::new(),
        Some(value) => parse_then_run(value, path)?,
    };

    Ok(AutoRunBlock { when, then_run })
}

fn parse_condition(expression: &Value) -> ConditionValue {
    let Some(operand) = expression.as_mapping().and_then(|m| m.get("$eq")) else {
        return ConditionValue::Other;
    };
    let values = match operand {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        scalar => scalar_to_string(scalar).into_iter().collect(),
    };
    ConditionValue::Equals(values)
}

fn parse_then_run(value: &Value, path: &Path) -> Result<Vec<(String, String)>> {
    let entries = value
        .as_sequence()
        .ok_or_else(|| SchemaError::ThenRunNotSequence {
            path: path.to_path_buf(),
            found: yaml_type_name(value).to_string(),
        })?;

    let mut pairs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let invalid = |found: String| SchemaError::InvalidThenRunEntry {
            path: path.to_path_buf(),
            index,
            found,
        };

        let mapping = entry
            .as_mapping()
            .ok_or_else(|| invalid(yaml_type_name(entry).to_string()))?;
        if mapping.len() != 1 {
            return Err(invalid(format!("a mapping with {} entries", mapping.len())).into());
        }

        let (key, value) = mapping.iter().next().expect("mapping has exactly one entry");
        let key = scalar_to_string(key)
            .ok_or_else(|| invalid(format!("a {} key", yaml_type_name(key))))?;
        let value = scalar_to_string(value)
            .ok_or_else(|| invalid(format!("a {} value", yaml_type_name(value))))?;
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// Render a scalar YAML value as a string; `None` for non-scalars.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
