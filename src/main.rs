use std::io;
use std::process::ExitCode;

use clap::Parser;

use parley::cli::{self, Cli, Commands};
use parley::config::AppConfig;
use parley::core::{AppError, Result};
use parley::logging::{self, LogTarget};
use parley::tui;

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Some(Commands::Config { command }) => cli::run_config(&command, &config),
        Some(Commands::Ask { prompt }) => {
            let (source, _) = cli::create_source(&config)?;
            let mut stdout = io::stdout();
            cli::run_ask(source.as_ref(), &prompt.join(" "), &mut stdout).await
        }
        None => {
            let (source, header) = cli::create_source(&config)?;
            tui::run_tui(source, header).await
        }
    }
}

fn report(err: &AppError) {
    eprintln!("✗ {err}");
    if let Some(hint) = err.hint() {
        eprintln!("  {hint}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    config.apply_overrides(cli.overrides());

    let target = match cli.command {
        None => LogTarget::for_tui(config.log_file.as_deref()),
        Some(_) => LogTarget::for_cli(config.log_file.as_deref()),
    };
    let _log_guard = logging::init(&target);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting with error");
            report(&e);
            ExitCode::FAILURE
        }
    }
}
