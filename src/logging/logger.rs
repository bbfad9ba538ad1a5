use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, Weak},
};

use crate::error::{Error, Result};

use super::{
    level::Level,
    path,
    template::{sanitize_format, sanitize_time_format},
    Args, Renderer,
};

const OVERWRITE_WARNING: &str = "Logger: Overwriting existing logger!";

/// A child name must be reachable again as a single path segment.
fn check_child_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name.starts_with("..") || name.contains('/') {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Configuration every node copies from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Properties {
    pub(crate) level: Level,
    pub(crate) format: String,
    pub(crate) format_time: String,
}

/// State shared by all nodes of one registry.
pub(crate) struct Shared {
    pub(crate) renderer: Arc<dyn Renderer>,
    pub(crate) use_ansi: bool,
}

pub(crate) struct Node {
    root: bool,
    name: String,
    full_name: String,
    parent: OnceLock<Weak<Node>>,
    props: RwLock<Properties>,
    children: Mutex<HashMap<String, Arc<Node>>>,
    shared: Arc<Shared>,
}

impl Node {
    /// The root of a new tree. Only [`Builder::build`](super::Builder::build)
    /// creates one.
    pub(crate) fn root(props: Properties, shared: Arc<Shared>) -> Self {
        Self::new(true, String::new(), String::new(), props, shared)
    }

    fn new(
        root: bool,
        name: String,
        full_name: String,
        props: Properties,
        shared: Arc<Shared>,
    ) -> Self {
        Self {
            root,
            name,
            full_name,
            parent: OnceLock::new(),
            props: RwLock::new(props),
            children: Mutex::new(HashMap::new()),
            shared,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn full_name(&self) -> &str {
        &self.full_name
    }

    fn is_root(&self) -> bool {
        self.root
    }

    pub(crate) fn shared(&self) -> &Shared {
        &self.shared
    }

    pub(crate) fn props(&self) -> Properties {
        self.props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_props(&self, update: impl FnOnce(&mut Properties)) {
        let mut props = self.props.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut props);
    }

    fn level(&self) -> Level {
        self.props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .level
    }

    fn children(&self) -> MutexGuard<'_, HashMap<String, Arc<Node>>> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn children_count(&self) -> usize {
        self.children().len()
    }

    /// Links the parent once. The root never gets one.
    fn set_parent(&self, parent: &Arc<Node>) {
        if self.is_root() {
            return;
        }
        let _ = self.parent.set(Arc::downgrade(parent));
    }

    pub(crate) fn parent(&self) -> Result<Arc<Node>> {
        let parent = self.parent.get().ok_or(Error::ParentOfRoot)?;
        parent
            .upgrade()
            .ok_or_else(|| Error::ParentDropped(self.full_name.clone()))
    }

    fn new_child(self: &Arc<Self>, name: &str) -> Arc<Node> {
        let full_name = if self.is_root() {
            name.to_string()
        } else {
            format!("{}/{}", self.full_name, name)
        };

        // Starting from a copy of our properties is the creation-time pull.
        let child = Arc::new(Node::new(
            false,
            name.to_string(),
            full_name,
            self.props(),
            Arc::clone(&self.shared),
        ));
        child.set_parent(self);

        tracing::trace!(target: "logtree", logger = %child.full_name, "created logger");
        child
    }

    pub(crate) fn create_child(self: &Arc<Self>, name: &str) -> Result<Arc<Node>> {
        check_child_name(name)?;
        let child = self.new_child(name);
        let replaced = self
            .children()
            .insert(name.to_string(), Arc::clone(&child))
            .is_some();

        if replaced {
            tracing::debug!(target: "logtree", logger = %child.full_name, "replaced existing logger");
            self.emit(Level::Warning, OVERWRITE_WARNING);
        }
        Ok(child)
    }

    pub(crate) fn existing_child(&self, name: &str) -> Option<Arc<Node>> {
        self.children().get(name).cloned()
    }

    pub(crate) fn child_or_create(self: &Arc<Self>, name: &str) -> Arc<Node> {
        let mut children = self.children();
        if let Some(child) = children.get(name) {
            return Arc::clone(child);
        }

        let child = self.new_child(name);
        children.insert(name.to_string(), Arc::clone(&child));
        child
    }

    /// Copies the parent's current configuration. No-op on the root.
    pub(crate) fn pull_properties(&self) {
        if let Ok(parent) = self.parent() {
            let props = parent.props();
            self.update_props(|own| *own = props);
        }
    }

    pub(crate) fn push_properties(&self) {
        for child in self.children().values() {
            child.pull_properties();
            child.push_properties();
        }
    }

    /// Removes childless descendants that only this tree holds.
    ///
    /// Children are pruned before they are inspected, so a chain of
    /// unreferenced nodes is removed in one call. Returns the number of
    /// removed nodes.
    pub(crate) fn prune(&self) -> usize {
        let mut removed = 0;
        self.children().retain(|_, child| {
            removed += child.prune();
            let keep = Arc::strong_count(child) > 1 || child.children_count() > 0;
            if !keep {
                tracing::trace!(target: "logtree", logger = %child.full_name, "pruned logger");
                removed += 1;
            }
            keep
        });
        removed
    }

    pub(crate) fn emit(&self, level: Level, msg: &str) {
        if level < self.level() {
            return;
        }

        let props = self.props();
        let renderer = &self.shared.renderer;
        let time = renderer.render_time(&props.format_time, &renderer.now());
        let name = if self.is_root() {
            "/"
        } else {
            self.full_name.as_str()
        };

        let mut args = Args::new();
        args.insert("open", "{".to_string());
        args.insert("close", "}".to_string());
        args.insert("name", name.to_string());
        args.insert("time", time);
        args.insert("level", level.painted(self.shared.use_ansi));
        args.insert("msg", msg.to_string());

        let line = renderer.render(&props.format, &args);
        renderer.emit(&line);
    }
}

/// Handle to a node of the logger tree.
///
/// Handles are cheap to clone. Holding one keeps its node alive and makes
/// [`Logger::prune`] on an ancestor keep it. Two handles are equal when they
/// point at the same node.
#[derive(Clone)]
pub struct Logger {
    node: Arc<Node>,
}

impl Logger {
    pub(crate) fn from_node(node: Arc<Node>) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &Arc<Node> {
        &self.node
    }

    /// Last path segment, empty for the root.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// Full slash-delimited path, empty for the root.
    pub fn full_name(&self) -> &str {
        self.node.full_name()
    }

    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }

    pub fn level(&self) -> Level {
        self.node.level()
    }

    pub fn format(&self) -> String {
        self.node.props().format
    }

    pub fn format_time(&self) -> String {
        self.node.props().format_time
    }

    pub fn children_count(&self) -> usize {
        self.node.children_count()
    }

    /// Local names of the direct children, sorted.
    pub fn children(&self) -> Vec<String> {
        let mut names: Vec<String> = self.node.children().keys().cloned().collect();
        names.sort();
        names
    }

    /// The parent, `None` for the root or once the parent was dropped.
    pub fn parent(&self) -> Option<Logger> {
        self.node.parent().ok().map(Logger::from_node)
    }

    /// Sets the minimum level that passes the filter.
    ///
    /// Descendants keep their copy until [`Logger::push_properties`].
    pub fn set_level(&self, level: impl Into<i32>) -> Result<()> {
        let level = Level::try_from(level.into())?;
        self.node.update_props(|props| props.level = level);
        Ok(())
    }

    /// Stores `format` with every brace outside a recognized placeholder
    /// escaped.
    pub fn set_format(&self, format: &str) {
        let format = sanitize_format(format);
        self.node.update_props(|props| props.format = format);
    }

    /// Stores `format_time` normalized to one `{:<strftime>}` group.
    pub fn set_format_time(&self, format_time: &str) {
        let format_time = sanitize_time_format(format_time);
        self.node.update_props(|props| props.format_time = format_time);
    }

    /// Resolves `path` relative to this logger, creating missing nodes.
    ///
    /// ```
    /// let registry = logtree::Registry::new();
    /// let db = registry.get_logger("app/db").unwrap();
    /// assert_eq!(db.child("../http").unwrap().full_name(), "app/http");
    /// ```
    pub fn child(&self, path: &str) -> Result<Logger> {
        path::resolve(&self.node, path).map(Logger::from_node)
    }

    /// Creates the direct child `name`, replacing an existing one.
    ///
    /// Replacing logs a warning on this logger. Handles to the old child
    /// stay valid but are detached from the tree. Fails with
    /// [`Error::InvalidName`] for names that are not a single path segment:
    /// empty, `.`, starting with `..`, or containing `/`.
    pub fn create_child(&self, name: &str) -> Result<Logger> {
        self.node.create_child(name).map(Logger::from_node)
    }

    /// Re-copies the parent's level and templates into this logger.
    pub fn pull_properties(&self) {
        self.node.pull_properties()
    }

    /// Makes every descendant re-pull its parent's configuration, top-down.
    pub fn push_properties(&self) {
        tracing::debug!(target: "logtree", logger = %self.node.full_name, "pushing properties");
        self.node.push_properties()
    }

    /// Removes descendants that have no children and no outside handle.
    pub fn prune(&self) -> usize {
        let removed = self.node.prune();
        tracing::debug!(target: "logtree", logger = %self.node.full_name, removed, "pruned tree");
        removed
    }

    /// Logs `msg` at `level`.
    ///
    /// Fails with [`Error::InvalidLevel`] for levels outside `0..Level::MAX`
    /// and does nothing when `level` is below this logger's level.
    pub fn log(&self, level: impl Into<i32>, msg: &str) -> Result<()> {
        let level = Level::try_from(level.into())?;
        self.node.emit(level, msg);
        Ok(())
    }

    pub fn debug(&self, msg: &str) {
        self.node.emit(Level::Debug, msg)
    }

    pub fn info(&self, msg: &str) {
        self.node.emit(Level::Info, msg)
    }

    pub fn warning(&self, msg: &str) {
        self.node.emit(Level::Warning, msg)
    }

    pub fn error(&self, msg: &str) {
        self.node.emit(Level::Error, msg)
    }

    pub fn critical(&self, msg: &str) {
        self.node.emit(Level::Critical, msg)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("full_name", &self.node.full_name)
            .field("level", &self.level())
            .finish()
    }
}
