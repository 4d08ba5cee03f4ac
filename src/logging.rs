//! File logging for the command line tool

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LOG_FILE_NAME, LOG_FILTER_ENV};

const DEFAULT_FILTER: &str = "info";

/// Send tracing output to `<data_dir>/ontocache.log`.
///
/// The filter is read from `$ONTOCACHE_LOG` and defaults to `info`. The returned
/// guard flushes buffered lines when dropped, so keep it alive until exit.
pub fn init(data_dir: &Path) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(data_dir)?;

    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(guard)
}
