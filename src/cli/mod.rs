pub mod config;
pub mod resolve;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "elm-deps",
    version,
    about = "Find every file an Elm module depends on"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the files an entry module transitively imports
    Resolve(resolve::ResolveArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve(args) => resolve::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}
