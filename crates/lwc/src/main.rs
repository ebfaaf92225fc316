//! # lwc
//!
//! Command-line entry point for the LWC language server. Starts the server
//! or prints the tag registry built from a workspace.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lwc")]
#[command(about = "Lightning Web Components language tooling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start Language Server Protocol server
    Lsp(commands::lsp::LspArgs),

    /// Index a workspace and print the known tags
    Tags(commands::tags::TagsArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lsp(args) => commands::lsp::run(args),
        Commands::Tags(args) => commands::tags::run(args),
    }
}
