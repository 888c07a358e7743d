use core::fmt;
use std::env;
use std::io::{self, Write};
use std::sync::atomic::{AtomicI32, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::level::{parse_level, LevelError, Severity, Stream, DEFAULT_LEVEL, LOG_LEVEL_ENV};
use crate::os_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> Location<'a> {
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A severity threshold plus the emit logic bound to it.
///
/// The process-wide instance behind [`crate::printl!`] and the `log` bridge is
/// [`Logger::global`]; separate instances keep their own threshold.
#[derive(Debug)]
pub struct Logger {
    threshold: AtomicI32,
}

static GLOBAL: Logger = Logger::with_threshold(DEFAULT_LEVEL);

impl Default for Logger {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_LEVEL)
    }
}

impl Logger {
    pub const fn with_threshold(threshold: i32) -> Self {
        Self {
            threshold: AtomicI32::new(threshold),
        }
    }

    pub fn global() -> &'static Logger {
        &GLOBAL
    }

    pub fn threshold(&self) -> i32 {
        self.threshold.load(Ordering::Relaxed)
    }

    pub fn set_threshold(&self, threshold: i32) {
        self.threshold.store(threshold, Ordering::Relaxed);
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity.enabled_at(self.threshold())
    }

    /// Applies a `LOG_LEVEL`-style value. `None` leaves the threshold alone,
    /// as does a value that fails to parse.
    pub fn init_from(&self, value: Option<&str>) -> Result<i32, LevelError> {
        if let Some(value) = value {
            self.set_threshold(parse_level(value)?);
        }
        Ok(self.threshold())
    }

    /// Reads `LOG_LEVEL` and applies it with [`Logger::init_from`].
    pub fn init_from_env(&self) -> Result<i32, LevelError> {
        let value = env::var_os(LOG_LEVEL_ENV);
        let value = value.as_ref().map(|v| v.to_string_lossy());
        self.init_from(value.as_deref())
    }

    /// Writes one record to stdout or stderr, holding the stream lock for the
    /// whole line.
    pub fn emit(
        &self,
        severity: Severity,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        if !self.enabled(severity) {
            return Ok(());
        }
        match severity.stream() {
            Stream::Stdout => write_record(&mut io::stdout().lock(), severity, location, args),
            Stream::Stderr => write_record(&mut io::stderr().lock(), severity, location, args),
        }
    }

    /// Same as [`Logger::emit`] but writes into the given sinks.
    pub fn emit_to<O, E>(
        &self,
        out: &mut O,
        err: &mut E,
        severity: Severity,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()>
    where
        O: Write,
        E: Write,
    {
        if !self.enabled(severity) {
            return Ok(());
        }
        match severity.stream() {
            Stream::Stdout => write_record(out, severity, location, args),
            Stream::Stderr => write_record(err, severity, location, args),
        }
    }

    /// Emits with an untyped severity code. Codes outside 0..=3 are ignored.
    pub fn emit_code(
        &self,
        code: i32,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        match Severity::from_code(code) {
            Some(severity) => self.emit(severity, location, args),
            None => Ok(()),
        }
    }

    pub fn emit_code_to<O, E>(
        &self,
        out: &mut O,
        err: &mut E,
        code: i32,
        location: Location<'_>,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()>
    where
        O: Write,
        E: Write,
    {
        match Severity::from_code(code) {
            Some(severity) => self.emit_to(out, err, severity, location, args),
            None => Ok(()),
        }
    }

    pub fn log_to<O, E>(&self, out: &mut O, err: &mut E, record: &Record<'_>) -> io::Result<()>
    where
        O: Write,
        E: Write,
    {
        self.emit_to(
            out,
            err,
            severity_of(record.level()),
            record_location(record),
            *record.args(),
        )
    }
}

/// Writes one line. An Error line consumes the OS error indicator only once
/// the whole line made it out; on a failed write the indicator is put back.
fn write_record<W: Write + ?Sized>(
    w: &mut W,
    severity: Severity,
    location: Location<'_>,
    args: fmt::Arguments<'_>,
) -> io::Result<()> {
    let os_error = match severity.stream() {
        Stream::Stderr => os_error::current(),
        Stream::Stdout => None,
    };
    let res = write_line(w, severity, location, args, os_error);
    if let Some(code) = os_error {
        os_error::set(if res.is_ok() { 0 } else { code });
    }
    res
}

fn write_line<W: Write + ?Sized>(
    w: &mut W,
    severity: Severity,
    location: Location<'_>,
    args: fmt::Arguments<'_>,
    os_error: Option<i32>,
) -> io::Result<()> {
    write!(w, "{}[{}] {}", severity.glyph(), location, args)?;
    match os_error {
        Some(code) => writeln!(w, ". ERR: {}", os_error::describe(code))?,
        None => w.write_all(b"\n")?,
    }
    w.flush()
}

fn record_location<'a>(record: &Record<'a>) -> Location<'a> {
    let file = record
        .file()
        .or_else(|| record.module_path())
        .unwrap_or_else(|| record.target());
    Location::new(file, record.line().unwrap_or(0))
}

/// Threshold to `log` max level. Trace is folded into Debug, so a threshold
/// of 3 or more lets every record through.
pub fn max_level_filter(threshold: i32) -> LevelFilter {
    match threshold {
        i32::MIN..=-1 => LevelFilter::Off,
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Trace,
    }
}

pub fn severity_of(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warn => Severity::Warning,
        Level::Info => Severity::Info,
        Level::Debug | Level::Trace => Severity::Debug,
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Logger::enabled(self, severity_of(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let _ = self.emit(severity_of(record.level()), record_location(record), *record.args());
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

/// Routes the `log` facade through the global logger.
pub fn install() -> Result<(), SetLoggerError> {
    log::set_logger(Logger::global()).map(|()| sync_max_level())
}

pub fn sync_max_level() {
    log::set_max_level(max_level_filter(GLOBAL.threshold()));
}
