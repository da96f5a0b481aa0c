use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system.
///
/// `verbose` raises this crate's level to debug. If `log_dir` is given, logs
/// are also written to a daily-rolling file in that directory.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("offbeat=debug,warn")
    } else {
        EnvFilter::new("offbeat=info,warn")
    };

    let registry = tracing_subscriber::registry().with(filter);
    let console = fmt::layer().with_target(false);

    if let Some(dir) = log_dir {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "offbeat.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes the writer on drop; logging runs for the whole
        // process, so keep it alive for the process lifetime.
        std::mem::forget(guard);

        registry
            .with(console)
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    } else {
        registry.with(console).init();
    }

    Ok(())
}
