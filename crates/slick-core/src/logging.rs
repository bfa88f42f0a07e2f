#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the standard `tracing` macros are re-exported
//! here (and at the crate root) so downstream crates log through a single
//! dependency. Without it, nothing in this module is compiled beyond the
//! level filter helper.
//!
//! With `tracing-json`, [`init_json_logging`] installs a global subscriber
//! that writes one JSON object per event to stderr, filtered by `RUST_LOG`
//! (falling back to [`DEFAULT_FILTER`]).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "slick_slider=info,slick_core=info";

/// Resolve the filter directive: `RUST_LOG` if set and non-empty, else the default.
#[must_use]
pub fn filter_directive() -> String {
    match std::env::var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Errors from installing the global JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub enum LoggingInitError {
    /// The filter directive could not be parsed.
    Filter(tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    AlreadyInstalled(tracing_subscriber::util::TryInitError),
}

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filter(e) => write!(f, "invalid log filter: {e}"),
            Self::AlreadyInstalled(e) => write!(f, "global subscriber already set: {e}"),
        }
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(e) => Some(e),
            Self::AlreadyInstalled(e) => Some(e),
        }
    }
}

/// Install a global JSON subscriber writing to stderr.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(filter_directive()).map_err(LoggingInitError::Filter)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(LoggingInitError::AlreadyInstalled)
}
