use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber
///
/// Output goes to stderr so that CLI commands can print results on stdout.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_filter(&config.level);

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    match result {
        Ok(()) => tracing::debug!(level = %config.level, "Logging initialized"),
        Err(e) => eprintln!("Logging already initialized: {}", e),
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
