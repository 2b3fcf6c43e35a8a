//! Exit codes for the CLI

/// General error
pub const ERROR: i32 = 1;

/// Malformed workload definition
pub const SCHEMA_ERROR: i32 = 2;

/// Required input file missing
pub const NOT_FOUND: i32 = 3;

/// Git invocation failed
pub const GIT_ERROR: i32 = 4;
