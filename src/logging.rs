//! Native log output (stderr, `RUST_LOG` filtering)

use tracing_subscriber::{fmt, EnvFilter};

use crate::core::consts::env::LOG_JSON;

/// Output format for the stderr subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `CONNECTBAR_LOG_JSON=1` selects JSON lines
    pub fn from_env() -> Self {
        match std::env::var(LOG_JSON).as_deref() {
            Ok("1") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

pub fn init_logging() {
    init_logging_with(LogFormat::from_env(), "info");
}

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging_with(format: LogFormat, default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}
