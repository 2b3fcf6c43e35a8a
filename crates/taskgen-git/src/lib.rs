//! Taskgen Git - version-control collaborator for patch mode
//!
//! Patch-mode selection needs the set of workload files touched since
//! the upstream merge base. This crate keeps that git dependency out
//! of the core: the core only ever sees the resulting path set.

pub mod changes;

pub use changes::modified_workload_files;
