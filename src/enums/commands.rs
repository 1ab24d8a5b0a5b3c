use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check the configuration and the API key environment variable
    Validate,
    /// Compare two specifications on the terminal board
    Compare {
        #[clap(short, long)]
        old: Option<PathBuf>,
        #[clap(short, long)]
        new: Option<PathBuf>,
        /// Print the validated result as JSON instead of drawing the board
        #[clap(long)]
        json: bool,
        /// Skip flap and overlay animation
        #[clap(long)]
        no_animation: bool,
        /// Open the detail overlay for this row (1-based) once the board settles
        #[clap(short, long)]
        detail: Option<usize>,
    },
    /// Serve the board in the browser
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        no_browser: bool,
    },
}
