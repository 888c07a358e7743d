//! Leveled logging to the standard streams.
//!
//! Every line is prefixed with a severity glyph and the call site:
//!
//! ```text
//! {-}[src/main.rs:12] cannot open config. ERR: No such file or directory
//! {~}[src/main.rs:13] falling back to defaults
//! {+}[src/main.rs:14] listening on 8080
//! ```
//!
//! Errors go to stderr, everything else to stdout. A single process-wide
//! threshold (default [`Severity::Info`]) decides what is printed; [`init`]
//! overrides it from the `LOG_LEVEL` environment variable.
//!
//! ```
//! use clog::{printl, Severity};
//!
//! clog::init();
//! printl!(Severity::Info, "started with {} workers", 4);
//! ```

pub mod level;
pub mod logger;
pub mod os_error;

use core::fmt;
use std::io;

pub use level::{parse_level, LevelError, Severity, Stream, DEFAULT_LEVEL, LOG_LEVEL_ENV};
pub use logger::{install, Location, Logger};

/// Applies `LOG_LEVEL` to the global threshold. A missing or malformed value
/// leaves the threshold unchanged.
pub fn init() {
    let _ = try_init();
}

/// Like [`init`], but reports a malformed `LOG_LEVEL`. Returns the resulting
/// threshold.
pub fn try_init() -> Result<i32, LevelError> {
    let res = Logger::global().init_from_env();
    logger::sync_max_level();
    res
}

pub fn level() -> i32 {
    Logger::global().threshold()
}

pub fn set_level(threshold: i32) {
    Logger::global().set_threshold(threshold);
    logger::sync_max_level();
}

pub fn emit(severity: Severity, location: Location<'_>, args: fmt::Arguments<'_>) -> io::Result<()> {
    Logger::global().emit(severity, location, args)
}

/// [`Location`] of the macro invocation.
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(file!(), line!())
    };
}

/// Logs through the global logger, returning the write result.
#[macro_export]
macro_rules! try_printl {
    ($severity:expr, $($arg:tt)+) => {
        $crate::emit($severity, $crate::here!(), format_args!($($arg)+))
    };
}

/// Logs through the global logger.
///
/// ```
/// use clog::{printl, Severity};
///
/// printl!(Severity::Warning, "disk {}% full", 91);
/// printl!(Severity::Debug, "not shown at the default threshold");
/// ```
#[macro_export]
macro_rules! printl {
    ($severity:expr, $($arg:tt)+) => {{
        let _ = $crate::try_printl!($severity, $($arg)+);
    }};
}
