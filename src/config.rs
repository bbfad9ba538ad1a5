use crate::{error::Result, logging::Level};

pub const LEVEL_VAR: &str = "LOGTREE_LEVEL";
pub const FORMAT_VAR: &str = "LOGTREE_FORMAT";
pub const FORMAT_TIME_VAR: &str = "LOGTREE_TIME_FORMAT";
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Root configuration of a registry. Every new node copies it from its
/// parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub level: Level,
    pub format: String,
    pub format_time: String,
    pub use_ansi: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            level: Level::Warning,
            format: "[{time}] [{level}] [{name}]: {msg}\n".to_string(),
            format_time: "{:%d-%m-%Y %H:%M:%S}".to_string(),
            use_ansi: true,
        }
    }

    /// Defaults overlaid with `LOGTREE_LEVEL`, `LOGTREE_FORMAT`,
    /// `LOGTREE_TIME_FORMAT` and `NO_COLOR`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::new();

        if let Some(level) = lookup(LEVEL_VAR) {
            config.level = level.parse()?;
        }
        if let Some(format) = lookup(FORMAT_VAR) {
            config.format = format;
        }
        if let Some(format_time) = lookup(FORMAT_TIME_VAR) {
            config.format_time = format_time;
        }
        // NOTE: https://no-color.org only cares about a non-empty value.
        if lookup(NO_COLOR_VAR).is_some_and(|value| !value.is_empty()) {
            config.use_ansi = false;
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
