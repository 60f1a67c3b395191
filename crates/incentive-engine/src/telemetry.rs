use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "log filter '{}' is not a valid EnvFilter directive", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "tracing subscriber unavailable: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directive).map_err(|source| TelemetryError::EnvFilter {
        value: directive.to_string(),
        source,
    })
}
