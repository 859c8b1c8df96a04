//! sitenav CLI - site navigation configuration tool.
//!
//! Provides commands for:
//! - `check`: Validate the configuration and the sources it links
//! - `routes`: Print the route table of local pages
//! - `sidebar`: Print the sidebar model as JSON
//! - `pager`: Print previous/next links of a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, PagerArgs, RoutesArgs, SidebarArgs};
use output::Output;

/// sitenav - Site navigation configuration tool.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and check that local pages exist.
    Check(CheckArgs),
    /// Print the route table of local pages.
    Routes(RoutesArgs),
    /// Print the sidebar model as JSON.
    Sidebar(SidebarArgs),
    /// Print previous/next links of a page.
    Pager(PagerArgs),
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
        Commands::Routes(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
        Commands::Pager(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
