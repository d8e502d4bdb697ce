//! Tracing setup for the CLI and embedders
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` overrides the filter; `BITBASEL_LOG_FORMAT` picks the layout
//! (`compact`, `pretty` or `json`). `BITBASEL_LOG_JSON=1` is shorthand for json.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,bitbasel=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }

    fn from_env() -> Self {
        if std::env::var("BITBASEL_LOG_JSON").map(|v| v == "1").unwrap_or(false) {
            return LogFormat::Json;
        }
        std::env::var("BITBASEL_LOG_FORMAT")
            .ok()
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default()
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

pub fn init_logging_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt::Subscriber::builder().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
