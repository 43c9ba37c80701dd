//! Structured log initialisation for the `gmin` binary.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry::Registry};

/// Pick the filter directive: the flag, then `RUST_LOG`, then the config.
pub fn filter_directive(flag: Option<&str>, rust_log: Option<&str>, configured: &str) -> String {
    flag.or(rust_log)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(configured)
        .to_string()
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a JSON subscriber writing to `log_path`, or to stderr.
///
/// The returned guard flushes the file writer on drop and must outlive
/// the batch.
pub fn init(directive: &str, log_path: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let filter = env_filter(directive);

    let (layer, guard) = match log_path {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log_path has no file name"))?;
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer)
                .boxed();
            (layer, Some(guard))
        }
        None => {
            let layer = fmt::layer()
                .json()
                .with_target(false)
                .with_writer(io::stderr)
                .boxed();
            (layer, None)
        }
    };

    let subscriber = Registry::default().with(filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok(guard)
}
