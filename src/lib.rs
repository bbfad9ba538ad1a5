//! Hierarchical loggers addressed by slash-delimited paths.
//!
//! Every logger is a node in a tree. Looking up a path creates the missing
//! nodes, and each new node copies its parent's level, message template and
//! time template. Later changes reach existing descendants only through
//! [`Logger::push_properties`].
//!
//! ```
//! use logtree::{Builder, CaptureRenderer, Level};
//!
//! let capture = CaptureRenderer::new();
//! let registry = Builder::new()
//!     .with_renderer(capture.clone())
//!     .with_ansi(false)
//!     .with_format("{level} {name}: {msg}")
//!     .build();
//!
//! let db = registry.get_logger("app/db").unwrap();
//! db.set_level(Level::Info).unwrap();
//! db.info("connected");
//! db.debug("not shown");
//!
//! assert_eq!(capture.lines(), vec!["INFO app/db: connected".to_string()]);
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::{
    get_logger, init, registry, Args, Builder, CaptureRenderer, DefaultRenderer, Level, Logger,
    Registry, Renderer,
};
