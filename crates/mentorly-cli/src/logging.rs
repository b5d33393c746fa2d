use anyhow::{Context, Result};
use mentorly_infrastructure::MentorlyPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "mentorly.log";

/// Installs the global subscriber.
///
/// Logs go to a daily file under the config `logs/` directory so the REPL
/// output stays readable; `verbose` mirrors them to stderr. The returned
/// guard must live until exit to flush the file writer.
pub fn init(paths: &MentorlyPaths, verbose: bool) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    MentorlyPaths::ensure_dir(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = verbose.then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(stderr)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging to {}", logs_dir.display());
    Ok(guard)
}
