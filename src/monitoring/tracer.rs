/*!
 * Tracing Setup
 *
 * Log output for the dispatcher. Everything goes to stderr so that stdout
 * carries nothing but the optional JSON run report.
 */

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting JSON log output
pub const TRACE_JSON_ENV: &str = "DISPATCHER_TRACE_JSON";

/// Filter applied when RUST_LOG is unset
const DEFAULT_DIRECTIVE: &str = "info";

/// Encoding of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    #[default]
    Compact,
    Json,
}

impl TraceFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var(TRACE_JSON_ENV).ok().as_deref())
    }

    /// `1` or `true` select JSON; anything else, or no value, is compact
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("1") | Some("true") => TraceFormat::Json,
            _ => TraceFormat::Compact,
        }
    }
}

/// Install the global subscriber, format chosen by `DISPATCHER_TRACE_JSON`.
/// A subscriber installed earlier is left in place.
pub fn init_tracing() {
    let format = TraceFormat::from_env();
    if try_init_tracing(format).is_ok() {
        tracing::debug!(?format, "Tracing initialized");
    }
}

/// Install the global subscriber with an explicit format
pub fn try_init_tracing(format: TraceFormat) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        TraceFormat::Json => registry
            .with(layer.json().with_current_span(true).with_span_list(false))
            .try_init(),
        TraceFormat::Compact => registry.with(layer.compact()).try_init(),
    }
}
