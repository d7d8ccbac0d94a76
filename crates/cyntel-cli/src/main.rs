//! # cyntel CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// CYNTEL — structured threat-intelligence object toolchain.
///
/// Constructs schema-validated domain objects, validates JSON documents
/// against the registry, and computes canonical content digests.
#[derive(Parser, Debug)]
#[command(name = "cyntel", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Construct an object and print its canonical JSON.
    Create(cyntel_cli::create::CreateArgs),
    /// Validate a JSON document against the schema registry.
    Validate(cyntel_cli::validate::ValidateArgs),
    /// Print the content digest of a validated document.
    Digest(cyntel_cli::digest::DigestArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Create(args) => cyntel_cli::create::run(&args),
        Commands::Validate(args) => cyntel_cli::validate::run(&args),
        Commands::Digest(args) => cyntel_cli::digest::run(&args),
    }
}
