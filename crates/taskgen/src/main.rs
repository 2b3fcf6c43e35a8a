//! Taskgen - auto-task manifest generator CLI

mod cli;
mod exit_codes;

use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use taskgen_core::TaskgenError;

use cli::Cli;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(exit_code_for(&err));
    }
}

/// Console tracing controlled by RUST_LOG (default: warn)
fn init_tracing() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_filter(console_filter),
        )
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TaskgenError>() {
        Some(TaskgenError::Schema(_)) => exit_codes::SCHEMA_ERROR,
        Some(TaskgenError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(TaskgenError::ExternalTool { .. }) => exit_codes::GIT_ERROR,
        _ => exit_codes::ERROR,
    }
}
