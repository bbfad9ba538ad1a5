//! In-memory renderer for assertions on emitted output.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
};

use chrono::{DateTime, Local};

use super::{render_template, Args, Renderer};

/// Records every emitted line instead of writing it.
///
/// Clones share the same buffer, so a test keeps one clone and hands the
/// other to [`Builder::with_renderer`](super::Builder::with_renderer).
#[derive(Clone, Default)]
pub struct CaptureRenderer {
    lines: Arc<Mutex<Vec<String>>>,
    renders: Arc<AtomicUsize>,
    now: Option<DateTime<Local>>,
}

impl CaptureRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the clock used for `{time}` to `instant`.
    pub fn at(instant: DateTime<Local>) -> Self {
        Self {
            now: Some(instant),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of message templates rendered so far.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Renderer for CaptureRenderer {
    fn render(&self, template: &str, args: &Args) -> String {
        self.renders.fetch_add(1, Ordering::SeqCst);
        render_template(template, args)
    }

    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    fn now(&self) -> DateTime<Local> {
        self.now.unwrap_or_else(Local::now)
    }
}
