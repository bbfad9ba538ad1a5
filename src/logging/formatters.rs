use std::io::{Stdout, Write};

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local,
};

use super::{
    template::{split_time_template, tokenize, Token},
    Args, Renderer,
};

/// Substitutes `{key}` placeholders from `args`.
///
/// Keys missing from `args` are copied through verbatim, and so are stray
/// braces in templates that were never sanitized.
pub fn render_template(template: &str, args: &Args) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    for token in tokenize(template) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Placeholder(key) => match args.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            },
            Token::Open => out.push('{'),
            Token::Close => out.push('}'),
        }
    }
    out
}

/// Renders a `prefix{:<strftime>}suffix` template at `instant`.
///
/// An invalid strftime pattern is written out as plain text.
pub fn render_time(template: &str, instant: &DateTime<Local>) -> String {
    let Some((prefix, spec, suffix)) = split_time_template(template) else {
        return template.to_string();
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return format!("{}{}{}", prefix, spec, suffix);
    }

    format!(
        "{}{}{}",
        prefix,
        instant.format_with_items(items.iter()),
        suffix
    )
}

/// Writes rendered lines to stdout.
pub struct DefaultRenderer {
    handle: Stdout,
}

impl DefaultRenderer {
    pub fn new() -> Self {
        Self {
            handle: std::io::stdout(),
        }
    }
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DefaultRenderer {
    fn emit(&self, line: &str) {
        let mut writer = self.handle.lock();
        if let Err(err) = writer.write_all(line.as_bytes()) {
            tracing::error!(target: "logtree", "failed writing log line: {}", err);
        }
    }

    fn flush(&self) {
        if let Err(err) = self.handle.lock().flush() {
            tracing::error!(target: "logtree", "failed flushing stdout: {}", err);
        }
    }
}
