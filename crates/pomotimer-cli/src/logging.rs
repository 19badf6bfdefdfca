//! Tracing setup.
//!
//! The interactive timer owns the terminal, so it logs to a daily rotating
//! file under `<data dir>/logs`. Other commands log to stderr.
//! `POMOTIMER_LOG` overrides the level filter.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "POMOTIMER_LOG";

fn filter(debug: bool, default_level: &str) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to `<data dir>/logs/pomotimer.log.<date>`.
///
/// The returned guard must be held until the program exits, or buffered
/// lines are lost.
pub fn init_file(debug: bool) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let dir = pomotimer_core::data_dir()?.join("logs");
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, "pomotimer.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(debug, "info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    let debug_enabled = debug;
    tracing::info!(dir = %dir.display(), debug_enabled, "logging initialized");
    Ok(guard)
}

/// Log warnings (or everything with `--debug`) to stderr.
pub fn init_stderr(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter(debug, "warn"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_writes_under_data_dir() {
        let home = tempfile::tempdir().unwrap();
        std::env::set_var("POMOTIMER_HOME", home.path());

        let guard = init_file(true).unwrap();
        tracing::debug!("after init");
        drop(guard);

        let logs = home.path().join("logs");
        let text: String = std::fs::read_dir(&logs)
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(text.contains("logging initialized"));
        assert!(text.contains("debug_enabled=true"));
        assert!(text.contains("after init"));
    }
}
