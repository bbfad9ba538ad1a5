use thiserror::Error;

use crate::logging::Level;

/// Errors raised by the logger tree.
///
/// All of them are caller mistakes; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid log level {0}, expected a value in 0..{max}", max = Level::MAX)]
    InvalidLevel(i32),

    #[error("unknown log level name {0:?}")]
    UnknownLevel(String),

    #[error("invalid logger name {0:?}, expected a single path segment")]
    InvalidName(String),

    #[error("you cannot get the parent of a root logger")]
    ParentOfRoot,

    /// The parent was dropped together with its registry while a handle to
    /// the child was still alive.
    #[error("parent of logger {0:?} no longer exists")]
    ParentDropped(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
