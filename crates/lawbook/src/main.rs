//! Lawbook CLI - site manifest tooling.
//!
//! Provides commands for:
//! - `check`: Run integrity checks against the docs tree
//! - `sidebar`: Show the sidebar resolved for a route
//! - `export`: Write the generator configuration as JSON
//! - `head`: Print the tags injected into every page head
//! - `plan`: Propose the next converted laws to add

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, HeadArgs, PlanArgs, SidebarArgs};
use output::Output;

/// Lawbook - site manifest tooling.
#[derive(Parser)]
#[command(name = "lawbook", version, about)]
struct Cli {
    /// Enable verbose output (show phase summaries).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check navbar, sidebar and site options against the docs tree.
    Check(CheckArgs),
    /// Print the sidebar resolved for a route as JSON.
    Sidebar(SidebarArgs),
    /// Write the generator configuration as JSON.
    Export(ExportArgs),
    /// Print the page head tags as HTML.
    Head(HeadArgs),
    /// Propose converted laws to add to the site.
    Plan(PlanArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Head(args) => args.execute(),
        Commands::Plan(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
