use crate::core::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// A non-empty RUST_LOG replaces the configured level entirely. Fails if the
/// directives do not parse or a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), &config.level)?;

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.output_format() {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    installed.context("Failed to install tracing subscriber")
}

fn build_filter(rust_log: Option<&str>, level: &str) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .context(format!("Invalid {} directives '{}'", EnvFilter::DEFAULT_ENV, directives)),
        None => EnvFilter::try_new(level).context(format!("Invalid log level '{}'", level)),
    }
}
