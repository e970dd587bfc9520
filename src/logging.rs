use std::fs::File;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a file-backed tracing subscriber.
///
/// Nothing is installed when `log_path` is `None`; writing log lines to the
/// terminal would corrupt the alternate screen. The filter defaults to `info`
/// and honors `RUST_LOG`.
pub fn init_logging(log_path: Option<&Path>) {
    let Some(log_path) = log_path else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = match File::create(log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to create log file {}: {err}", log_path.display());
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
