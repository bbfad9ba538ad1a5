use std::sync::{Arc, OnceLock};

use eyre::Context;
use log::{LevelFilter, Log};

use crate::{config::Config, error::Result};

use super::{
    formatters::DefaultRenderer,
    level::Level,
    logger::{Logger, Node, Properties, Shared},
    path, Renderer,
};

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Process-wide registry, built from [`Config::from_env`] on first use.
///
/// A broken environment falls back to the defaults with a warning.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let config = Config::from_env().unwrap_or_else(|err| {
            tracing::warn!(target: "logtree", "ignoring logger environment: {}", err);
            Config::new()
        });
        Builder::new().with_config(config).build()
    })
}

/// Resolves `path` from the root of the process-wide registry.
pub fn get_logger(path: &str) -> Result<Logger> {
    registry().get_logger(path)
}

/// Routes records of the `log` crate into the process-wide registry.
pub fn init() -> eyre::Result<()> {
    log::set_max_level(LevelFilter::Trace);
    log::set_logger(registry()).context("Failed registering logger tree")?;

    Ok(())
}

/// Owner of one logger tree.
pub struct Registry {
    root: Logger,
}

impl Registry {
    pub fn new() -> Self {
        Builder::new().build()
    }

    pub fn root(&self) -> &Logger {
        &self.root
    }

    /// Resolves `path` from the root, creating missing loggers.
    pub fn get_logger(&self, path: &str) -> Result<Logger> {
        self.root.child(path)
    }

    /// Installs this registry as the global `log` implementation.
    pub fn init(self) -> eyre::Result<()> {
        log::set_max_level(LevelFilter::Trace);
        log::set_boxed_logger(Box::new(self)).context("Failed registering logger tree")?;

        Ok(())
    }

    /// Logger for a `log` target: `app::db` maps to `app/db`.
    ///
    /// Each new target materializes its loggers, which stay in the tree
    /// until [`Logger::prune`] removes them.
    fn logger_for(&self, target: &str) -> Result<Logger> {
        self.get_logger(&target.replace("::", "/"))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for Registry {
    /// Answers from the closest existing logger, so queries never grow the
    /// tree.
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let path = metadata.target().replace("::", "/");
        let node = path::closest(self.root.node(), &path);
        Level::from(metadata.level()) >= Logger::from_node(node).level()
    }

    fn log(&self, record: &log::Record) {
        match self.logger_for(record.target()) {
            Ok(logger) => logger.node().emit(record.level().into(), &record.args().to_string()),
            Err(err) => {
                tracing::debug!(target: "logtree", "dropping record for {}: {}", record.target(), err)
            }
        }
    }

    fn flush(&self) {
        self.root.node().shared().renderer.flush()
    }
}

pub struct Builder {
    config: Config,
    renderer: Arc<dyn Renderer>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            config: Config::new(),
            renderer: Arc::new(DefaultRenderer::new()),
        }
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.config.format = format.into();
        self
    }

    pub fn with_format_time(mut self, format_time: impl Into<String>) -> Self {
        self.config.format_time = format_time.into();
        self
    }

    pub fn with_ansi(mut self, use_ansi: bool) -> Self {
        self.config.use_ansi = use_ansi;
        self
    }

    pub fn with_renderer(self, renderer: impl Renderer + 'static) -> Self {
        Self {
            renderer: Arc::new(renderer),
            ..self
        }
    }

    pub fn build(self) -> Registry {
        let shared = Arc::new(Shared {
            renderer: self.renderer,
            use_ansi: self.config.use_ansi,
        });
        let props = Properties {
            level: self.config.level,
            format: String::new(),
            format_time: String::new(),
        };

        let root = Logger::from_node(Arc::new(Node::root(props, shared)));
        root.set_format(&self.config.format);
        root.set_format_time(&self.config.format_time);

        Registry { root }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use log::{Metadata, Record};

    use super::*;
    use crate::logging::CaptureRenderer;

    fn registry() -> (Registry, CaptureRenderer) {
        let capture = CaptureRenderer::new();
        let registry = Builder::new()
            .with_renderer(capture.clone())
            .with_ansi(false)
            .with_format("{level} {name}: {msg}")
            .build();
        (registry, capture)
    }

    #[test]
    fn builder_sanitizes_root_templates() {
        let registry = Builder::new()
            .with_format("{{msg}}")
            .with_format_time("%H")
            .with_level(Level::Info)
            .build();

        assert_eq!(registry.root().format(), "{open}{msg}{close}");
        assert_eq!(registry.root().format_time(), "{:%H}");
        assert_eq!(registry.root().level(), Level::Info);
    }

    #[test]
    fn default_config() {
        let registry = Registry::new();
        let root = registry.root();
        assert_eq!(root.level(), Level::Warning);
        assert_eq!(root.format(), "[{time}] [{level}] [{name}]: {msg}\n");
        assert_eq!(root.format_time(), "{:%d-%m-%Y %H:%M:%S}");
    }

    #[test]
    fn records_are_routed_by_target() {
        let (registry, capture) = registry();
        registry.get_logger("app").unwrap().set_level(Level::Debug).unwrap();

        registry.log(
            &Record::builder()
                .target("app::db")
                .level(log::Level::Info)
                .args(format_args!("connected"))
                .build(),
        );
        registry.log(
            &Record::builder()
                .target("other")
                .level(log::Level::Info)
                .args(format_args!("hidden"))
                .build(),
        );

        assert_eq!(capture.lines(), vec!["INFO app/db: connected".to_string()]);
    }

    #[test]
    fn enabled_follows_target_level() {
        let (registry, _) = registry();
        let warn = Metadata::builder()
            .target("svc")
            .level(log::Level::Warn)
            .build();
        let trace = Metadata::builder()
            .target("svc")
            .level(log::Level::Trace)
            .build();

        assert!(registry.enabled(&warn));
        assert!(!registry.enabled(&trace));
    }

    #[test]
    fn enabled_does_not_grow_the_tree() {
        let (registry, _) = registry();
        registry.get_logger("app").unwrap().set_level(Level::Debug).unwrap();
        let debug = Metadata::builder()
            .target("app::db::pool")
            .level(log::Level::Debug)
            .build();
        let other = Metadata::builder()
            .target("other::deep")
            .level(log::Level::Debug)
            .build();

        assert!(registry.enabled(&debug));
        assert!(!registry.enabled(&other));
        assert_eq!(registry.root().children(), vec!["app".to_string()]);
        assert_eq!(registry.get_logger("app").unwrap().children_count(), 0);
    }
}
