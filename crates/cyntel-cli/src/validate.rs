//! The `validate` subcommand: run a JSON document through schema
//! validation and report the outcome.

use std::path::PathBuf;

use clap::Args;

use crate::document;

/// Arguments for `cyntel validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON document to validate.
    pub file: PathBuf,
}

/// Validate the document; prints the record identifier on success.
pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let record = document::load_and_validate(&args.file)?;
    tracing::info!(kind = record.kind(), "document validated");
    println!("valid: {}", record.id().unwrap_or("<no id>"));
    Ok(())
}
