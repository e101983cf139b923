use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizboard_cli::config::CliConfig;
use quizboard_cli::{Cli, run};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| run(&cli, &config));

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("quizboard: {e}");
            ExitCode::FAILURE
        },
    }
}
