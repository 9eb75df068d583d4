//! ---
//! pprz_section: "03-logging"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Structured logging adapters and sinks."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
//! Logging macros that attach message class and name to every event.

#[doc(hidden)]
#[macro_export]
macro_rules! __msg_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            class = ctx.class.unwrap_or(""),
            name = ctx.name.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with message context.
#[macro_export]
macro_rules! msg_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with message context.
#[macro_export]
macro_rules! msg_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with message context.
#[macro_export]
macro_rules! msg_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__msg_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
