use core::fmt;
use core::str::FromStr;
use std::num::ParseIntError;

/// Threshold used until `init` or `set_level` says otherwise.
pub const DEFAULT_LEVEL: i32 = Severity::Info as i32;

/// Environment variable read by `init`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Message severity. Lower codes are more critical; a message is shown when
/// the threshold is numerically greater than or equal to its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Severity {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("invalid log level {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown severity {0:?}, expected 0-3 or error/warning/info/debug")]
    UnknownSeverity(String),
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
    ];

    /// Maps a raw code back to a severity, `None` for anything outside 0..=3.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Severity::Error),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Info),
            3 => Some(Severity::Debug),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Severity::Error => "{-}",
            Severity::Warning => "{~}",
            Severity::Info => "{+}",
            Severity::Debug => "{*}",
        }
    }

    pub const fn stream(self) -> Stream {
        match self {
            Severity::Error => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    pub const fn enabled_at(self, threshold: i32) -> bool {
        threshold >= self.code()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        };
        f.write_str(name)
    }
}

impl FromStr for Severity {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Severity::from_code(code).ok_or_else(|| LevelError::UnknownSeverity(s.to_owned()));
        }
        match s.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(LevelError::UnknownSeverity(s.to_owned())),
        }
    }
}

/// Parses a `LOG_LEVEL` value.
///
/// Only a plain integer (optionally surrounded by whitespace) is accepted.
/// Out-of-range integers are returned as-is: `-1` silences everything and
/// anything above 3 enables everything. Trailing garbage such as `"2x"` is
/// rejected rather than truncated.
pub fn parse_level(value: &str) -> Result<i32, LevelError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|source| LevelError::Invalid {
            value: value.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_ordered_by_verbosity() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
        for (i, s) in Severity::ALL.iter().enumerate() {
            assert_eq!(s.code(), i as i32);
            assert_eq!(Severity::from_code(i as i32), Some(*s));
        }
        assert_eq!(DEFAULT_LEVEL, 2);
    }

    #[test]
    fn unknown_codes_have_no_severity() {
        assert_eq!(Severity::from_code(-1), None);
        assert_eq!(Severity::from_code(4), None);
        assert_eq!(Severity::from_code(i32::MAX), None);
    }

    #[test]
    fn routing_table() {
        assert_eq!(Severity::Error.glyph(), "{-}");
        assert_eq!(Severity::Warning.glyph(), "{~}");
        assert_eq!(Severity::Info.glyph(), "{+}");
        assert_eq!(Severity::Debug.glyph(), "{*}");

        assert_eq!(Severity::Error.stream(), Stream::Stderr);
        assert_eq!(Severity::Warning.stream(), Stream::Stdout);
        assert_eq!(Severity::Info.stream(), Stream::Stdout);
        assert_eq!(Severity::Debug.stream(), Stream::Stdout);
    }

    #[test]
    fn enabled_iff_threshold_at_least_code() {
        for threshold in -2..=5 {
            for s in Severity::ALL {
                assert_eq!(s.enabled_at(threshold), threshold >= s.code());
            }
        }
        assert!(Severity::Error.enabled_at(0));
        assert!(!Severity::Warning.enabled_at(0));
        assert!(Severity::Debug.enabled_at(3));
    }

    #[test]
    fn parse_level_accepts_integers() {
        assert_eq!(parse_level("1"), Ok(1));
        assert_eq!(parse_level(" 3\n"), Ok(3));
        assert_eq!(parse_level("-1"), Ok(-1));
        assert_eq!(parse_level("42"), Ok(42));
    }

    #[test]
    fn parse_level_rejects_garbage() {
        for bad in ["", "abc", "2x", "1.5", "info"] {
            match parse_level(bad) {
                Err(LevelError::Invalid { value, .. }) => assert_eq!(value, bad),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn severity_from_name_or_code() {
        assert_eq!("0".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("WARNING".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("Info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!(" debug ".parse::<Severity>(), Ok(Severity::Debug));
        assert_eq!(
            "7".parse::<Severity>(),
            Err(LevelError::UnknownSeverity("7".to_owned()))
        );
        assert!("loud".parse::<Severity>().is_err());
    }
}
