//! Structured logging.
//!
//! Two sinks share one `tracing` registry:
//! - stdout, filtered by `RUST_LOG` or the configured level
//! - the operational log file, which receives every warning and error plus
//!   `info` events on the [`OPLOG_TARGET`] target (page-load heartbeats)
//!
//! Write failures on the operational log are swallowed by the fmt layer and
//! never reach a request.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, registry::{LookupSpan, Registry},
    util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::ObservabilityConfig;

/// Target for events that belong in the operational log below `warn`.
pub const OPLOG_TARGET: &str = "oplog";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Open the operational log for appending, creating it (and its directory)
/// if needed. With `clear` set the existing content is discarded.
pub fn open_oplog(path: &Path, clear: bool) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    if clear {
        File::create(path)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Whether an event or span is routed to the operational log.
pub fn is_operational(metadata: &Metadata<'_>) -> bool {
    *metadata.level() <= Level::WARN || metadata.target() == OPLOG_TARGET
}

/// Plain-text layer writing operational events to `file`.
pub fn oplog_layer<S>(file: File) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(filter_fn(is_operational))
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "textboard={level},{OPLOG_TARGET}={level},tower_http=info",
            level = config.log_level
        ))
    });

    let (oplog_file, oplog_error) =
        match open_oplog(Path::new(&config.log_path), config.clear_log_on_start) {
            Ok(file) => (Some(file), None),
            Err(e) => (None, Some(e)),
        };
    tracing_subscriber::registry()
        .with(oplog_file.map(oplog_layer::<Registry>))
        .with(fmt::layer().with_filter(env_filter))
        .try_init()?;

    match oplog_error {
        None => tracing::debug!(path = %config.log_path, "Operational log attached"),
        Some(e) => tracing::warn!(
            path = %config.log_path,
            error = %e,
            "Operational log unavailable, logging to stdout only"
        ),
    }
    Ok(())
}
