//! FollowSweep CLI entrypoint for reviewing a followed-accounts list.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use followsweep::{FollowSweepConfig, OperationMode, SweepError};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SweepError> {
    let config = load_config()?;
    let _log_guard = init_logging(&config);

    match config.operation_mode() {
        OperationMode::Scan => cli::scan::run(&config).await,
        OperationMode::ReviewTui => cli::review_tui::run(&config).await,
        OperationMode::Export => cli::export::run(&config),
        OperationMode::Clear => cli::clear::run(&config),
        OperationMode::MigrateDb => cli::migrations::run(&config),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<FollowSweepConfig, SweepError> {
    FollowSweepConfig::load().map_err(|error| SweepError::Configuration {
        message: error.to_string(),
    })
}

/// Installs the tracing subscriber for the process.
///
/// Events go to stderr, filtered by `RUST_LOG` and defaulting to warnings
/// only so the TUI screen stays clean. When a log file is configured, a
/// second layer appends the same events there; the returned guard keeps the
/// background writer alive until exit.
fn init_logging(config: &FollowSweepConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(io::stderr).with_ansi(false);

    let Some(file) = config.log_file.as_deref() else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return None;
    };

    let path = Utf8Path::new(file);
    let directory = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map_or(".", Utf8Path::as_str);
    let file_name = path.file_name().unwrap_or("followsweep.log");
    let (writer, guard) = tracing_appender::non_blocking(rolling::never(directory, file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Some(guard)
}
