use std::{fmt, str::FromStr};

use yansi::{Color, Paint};

use crate::error::{Error, Result};

/// Severity of a log message, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Level {
    NotSet = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
}

impl Level {
    /// One past the most severe level.
    pub const MAX: i32 = 6;

    pub const ALL: [Level; 6] = [
        Level::NotSet,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Level::NotSet => "",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Level::NotSet => Color::White,
            Level::Debug => Color::Green,
            Level::Info => Color::Blue,
            Level::Warning => Color::Yellow,
            Level::Error => Color::Red,
            Level::Critical => Color::Magenta,
        }
    }

    /// The `{level}` value substituted into message templates.
    pub fn painted(self, use_ansi: bool) -> String {
        if use_ansi {
            self.label().paint(self.color()).to_string()
        } else {
            self.label().to_string()
        }
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level as i32
    }
}

impl TryFrom<i32> for Level {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Level::ALL.get(idx).copied())
            .ok_or(Error::InvalidLevel(value))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Accepts a level name in any case (`warn` is an alias of `warning`)
    /// or its integer value.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i32>() {
            return Level::try_from(value);
        }

        match s.to_ascii_lowercase().as_str() {
            "notset" => Ok(Level::NotSet),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::NotSet => write!(f, "NOTSET"),
            level => write!(f, "{}", level.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_range_is_checked() {
        assert_eq!(Level::try_from(0), Ok(Level::NotSet));
        assert_eq!(Level::try_from(5), Ok(Level::Critical));
        assert_eq!(Level::try_from(Level::MAX), Err(Error::InvalidLevel(6)));
        assert_eq!(Level::try_from(-1), Err(Error::InvalidLevel(-1)));
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Level::NotSet < Level::Debug);
        assert!(Level::Warning < Level::Error);
        assert_eq!(i32::from(Level::Info), 2);
    }

    #[test]
    fn parses_names_and_numbers() {
        assert_eq!("INFO".parse::<Level>(), Ok(Level::Info));
        assert_eq!("warn".parse::<Level>(), Ok(Level::Warning));
        assert_eq!(" 4 ".parse::<Level>(), Ok(Level::Error));
        assert_eq!("9".parse::<Level>(), Err(Error::InvalidLevel(9)));
        assert_eq!(
            "loud".parse::<Level>(),
            Err(Error::UnknownLevel("loud".to_string()))
        );
    }

    #[test]
    fn plain_label_without_ansi() {
        assert_eq!(Level::Critical.painted(false), "CRITICAL");
        assert_eq!(Level::NotSet.painted(false), "");
    }

    #[test]
    fn trace_folds_into_debug() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
    }
}
