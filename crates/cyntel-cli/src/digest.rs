//! The `digest` subcommand: print the content digest of a validated
//! document.

use std::path::PathBuf;

use clap::Args;

use crate::document;

/// Arguments for `cyntel digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Path to the JSON document to digest.
    pub file: PathBuf,
}

/// Validate the document and print its `sha256:<hex>` digest.
pub fn run(args: &DigestArgs) -> anyhow::Result<()> {
    let record = document::load_and_validate(&args.file)?;
    println!("{}", record.digest()?);
    Ok(())
}
