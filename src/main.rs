use clap::Parser;
use specboard_cli::errors::ErrorHandler;
use specboard_cli::structs::cli::Cli;
use specboard_cli::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli.config);

    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }
}
