//! ---
//! pprz_section: "03-logging"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Structured logging adapters and sinks."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
#![warn(missing_docs)]

use once_cell::sync::OnceCell;
use pprz_common::{LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter};

pub mod macros;

static STDERR_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialize a baseline tracing subscriber suitable for development.
pub fn init() {
    init_with(&LoggingConfig::default());
}

/// Initialize the tracing subscriber from logging configuration.
///
/// `RUST_LOG` takes precedence over the configured filter. Events go to
/// stderr so command output on stdout stays clean. Repeated calls are no-ops.
pub fn init_with(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let fmt_layer = match config.format {
        LogFormat::StructuredJson => subscriber_fmt::layer()
            .with_target(false)
            .json()
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => subscriber_fmt::layer()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        let _ = STDERR_GUARD.set(guard);
    }
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Message class associated with the log event.
    pub class: Option<&'a str>,
    /// Message name associated with the log event.
    pub name: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a message class.
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    /// Attach a message name.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }
}
