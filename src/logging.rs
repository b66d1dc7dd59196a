use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging. Call once at startup.
///
/// The filter comes from `RUST_LOG` (default `info`). Logs go to stderr so
/// command output on stdout stays clean.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to set global tracing subscriber: {}", e);
        return;
    }

    tracing::debug!(json = json, "Structured logging initialized");
}
