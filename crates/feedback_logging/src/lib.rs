#![deny(missing_docs)]
//! Shared logging utilities for the magnet feedback workspace.
//!
//! Every crate logs through the `feedback_*` macros below so that callers
//! never need a direct dependency on the `log` facade. Failures that the
//! actions swallow (clipboard, transport, backend-reported) go to the
//! [`DIAGNOSTICS_TARGET`] channel through [`feedback_diagnostic!`].

#[doc(hidden)]
pub use log as __log;

/// Log target used for action failures that are converted into feedback.
pub const DIAGNOSTICS_TARGET: &str = "diagnostics";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! feedback_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! feedback_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! feedback_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! feedback_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! feedback_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Writes an action failure to the diagnostics channel (error level).
#[macro_export]
macro_rules! feedback_diagnostic {
    ($($arg:tt)*) => {{
        $crate::__log::error!(target: $crate::DIAGNOSTICS_TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
