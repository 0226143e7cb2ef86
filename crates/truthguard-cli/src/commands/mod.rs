//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod serve;

/// TruthGuard - fake news and manipulated image detection
#[derive(Parser)]
#[command(name = "truthguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the content analysis endpoint
    Serve(serve::ServeArgs),

    /// Submit text and/or an image for verification
    Check(check::CheckArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Check(args) => check::execute(args).await,
        }
    }
}
