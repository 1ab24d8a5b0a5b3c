use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "specboard")]
#[clap(about = "Airport departure board for OpenAPI specification changes", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/specboard/config.toml)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
