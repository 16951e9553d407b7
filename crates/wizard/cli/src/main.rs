//! Contracts Wizard CLI
//!
//! Terminal front end to the composition engine:
//! - Print a single contract from a standard and JSON options
//! - Export a generated corpus, optionally reduced to a minimal cover
//! - List the supported standards
//! - Query whether options require access control

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{access, generate, kinds, print, ContractArgs};
use error::CliResult;

/// Contracts Wizard CLI application
#[derive(Parser)]
#[command(name = "wizard")]
#[command(about = "Contracts Wizard - compose and export smart contract sources", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Print the source of one contract
    Print(print::PrintArgs),

    /// Export generated contracts as content-addressed files
    #[command(alias = "gen")]
    Generate(generate::GenerateArgs),

    /// List supported standards
    Kinds,

    /// Print whether the options require access control
    AccessRequired(ContractArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries contract sources
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli.command) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Print(args) => print::execute(args),
        Commands::Generate(args) => generate::execute(args),
        Commands::Kinds => kinds::execute(),
        Commands::AccessRequired(args) => access::execute(args),
    }
}
