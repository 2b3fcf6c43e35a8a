//! CLI command implementations

mod generate;

pub use generate::{AllCommand, PatchCommand, VariantCommand};
