mod capture;
mod formatters;
mod level;
mod logger;
mod path;
mod registry;
pub mod template;

use std::collections::HashMap;

use chrono::{DateTime, Local};

pub use capture::CaptureRenderer;
pub use formatters::{render_template, render_time, DefaultRenderer};
pub use level::Level;
pub use logger::Logger;
pub use registry::{get_logger, init, registry, Builder, Registry};

/// Substitution values for a message template, keyed by placeholder.
pub type Args = HashMap<&'static str, String>;

/// Turns a node's templates into output and writes it.
///
/// Templates reaching a renderer are already sanitized: in message templates
/// every brace belongs to a placeholder, time templates hold exactly one
/// `{:<strftime>}` group.
pub trait Renderer: Sync + Send {
    fn render(&self, template: &str, args: &Args) -> String {
        render_template(template, args)
    }

    fn render_time(&self, template: &str, instant: &DateTime<Local>) -> String {
        render_time(template, instant)
    }

    fn emit(&self, line: &str);

    fn flush(&self) {}

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
