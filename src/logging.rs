use error_stack::{Result, ResultExt};
use std::io::IsTerminal;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{Compact, Format, Full, Pretty, Writer};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize logging")]
pub struct LoggingInitError;

/// Installs the global subscriber: console output in the configured
/// style, filtered by `logging.targets` (or `RUST_LOG` when empty),
/// plus span trace capturing for [`crate::Error`].
pub fn init(config: &config::Logging) -> Result<(), LoggingInitError> {
    let ansi = std::io::stdout().is_terminal();
    let console = fmt::layer().event_format(Formatter::from_style(config.style, ansi));

    let registry = tracing_subscriber::Registry::default()
        .with(make_env_filter(&config.targets))
        .with(console)
        .with(tracing_error::ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(LoggingInitError)
        .attach_printable("already initialized logging")?;

    if std::env::var("RUST_LOG").is_ok() && !config.targets.is_empty() {
        tracing::warn!(
            "Both `RUST_LOG` and `USERGRAPH_LOGGING_TARGETS` are set, `RUST_LOG` is ignored"
        );
    }

    Ok(())
}

/// Same as [`init`] but writes through the test harness so output is
/// captured per test. Calling it more than once does nothing.
#[cfg(test)]
pub fn init_for_tests() {
    let console = fmt::layer()
        .event_format(Formatter::from_style(LoggingStyle::Full, false))
        .with_test_writer();

    let registry = tracing_subscriber::Registry::default()
        .with(make_env_filter(""))
        .with(console)
        .with(tracing_error::ErrorLayer::default());

    tracing::subscriber::set_global_default(registry).ok();
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let builder = EnvFilter::builder().with_default_directive(default_level.into());
    if targets.is_empty() {
        builder.from_env_lossy()
    } else {
        builder.parse_lossy(targets)
    }
}

enum Formatter {
    Full(Format<Full, ChronoUtc>),
    Pretty(Format<Pretty, ChronoUtc>),
    Compact(Format<Compact, ChronoUtc>),
}

impl Formatter {
    fn from_style(style: LoggingStyle, ansi: bool) -> Self {
        let default = fmt::format()
            .with_timer(ChronoUtc::new("%Y-%m-%dT%H:%M:%S%.6fZ".to_string()))
            .with_ansi(ansi);

        match style {
            LoggingStyle::Compact => Self::Compact(default.compact()),
            LoggingStyle::Full => Self::Full(default),
            LoggingStyle::Pretty => Self::Pretty(default.pretty()),
        }
    }
}

impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        match self {
            Formatter::Full(fmt) => fmt.format_event(ctx, writer, event),
            Formatter::Pretty(fmt) => fmt.format_event(ctx, writer, event),
            Formatter::Compact(fmt) => fmt.format_event(ctx, writer, event),
        }
    }
}
