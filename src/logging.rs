use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";

/// Where log lines go. The terminal UI owns stdout and stderr, so while it
/// runs logs are either written to a file or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

impl LogTarget {
    #[must_use]
    pub fn for_tui(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Disabled, |path| Self::File(path.to_path_buf()))
    }

    #[must_use]
    pub fn for_cli(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Stderr, |path| Self::File(path.to_path_buf()))
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// life of the program so buffered file output is flushed on exit.
pub fn init(target: &LogTarget) -> Option<WorkerGuard> {
    match target {
        LogTarget::Disabled => None,
        LogTarget::Stderr => {
            let subscriber = tracing_subscriber::registry().with(env_filter()).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            );
            if tracing::subscriber::set_global_default(subscriber).is_err() {
                eprintln!("Failed to set tracing subscriber");
            }
            None
        }
        LogTarget::File(path) => init_file(path),
    }
}

fn init_file(path: &Path) -> Option<WorkerGuard> {
    let file = match fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {e}", path.display());
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter()).with(
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
        return None;
    }

    tracing::info!(path = %path.display(), "file logging initialized");
    Some(guard)
}
