//! Process-wide `tracing` setup for the service binary.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,tower_http=info";

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Compact single-line formatter with timestamps, targets and span-close
/// timings. ANSI colors only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        // span close events carry the duration of instrumented handlers
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_target(true),
        )
}

/// `RUST_LOG` if set and valid, otherwise `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(layer())
        .try_init()
}
