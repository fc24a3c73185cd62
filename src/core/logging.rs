//! File-based logging for TUI mode.
//!
//! While ratatui owns the terminal nothing may print to stdout, so all
//! logs go to a daily-rolling JSON file under the data directory. The
//! standard `log` macros are redirected into `tracing`.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging into `<data_dir>/logs/courtside.log.<date>`.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of
/// the application so buffered logs flush on shutdown.
pub fn init_tui(data_dir: &Path) -> WorkerGuard {
    let log_dir = data_dir.join("logs");
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create logs directory: {e}");
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "courtside.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer - the TUI owns the terminal.
    tracing_subscriber::registry().with(file_layer).init();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {e}");
    }

    guard
}
