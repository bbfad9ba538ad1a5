//! Message and time template handling.
//!
//! Message templates use `{key}` placeholders. Only the keys in
//! [`PLACEHOLDERS`] are substitution syntax; any other brace is user text and
//! is rewritten to `{open}` / `{close}` when the template is stored.
//!
//! Time templates carry exactly one `{:<strftime>}` group. Text around the
//! group is copied as is, and every brace outside the group is dropped.

/// Placeholder keys recognized in message templates, without braces.
pub const PLACEHOLDERS: [&str; 6] = ["open", "close", "name", "time", "level", "msg"];

/// One lexical unit of a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A run of text without braces.
    Text(&'a str),
    /// A recognized `{key}`, holding the key.
    Placeholder(&'a str),
    /// A `{` that does not start a recognized placeholder.
    Open,
    /// A `}` that does not end a recognized placeholder.
    Close,
}

fn placeholder_at(rest: &str) -> Option<&'static str> {
    PLACEHOLDERS.into_iter().find(|key| {
        rest.strip_prefix('{')
            .and_then(|r| r.strip_prefix(*key))
            .is_some_and(|r| r.starts_with('}'))
    })
}

/// Splits a message template into tokens.
///
/// Placeholders never contain braces between their delimiters, so two
/// occurrences can not overlap and a single left-to-right pass finds all of
/// them.
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let brace = match bytes[i] {
            b'{' => Token::Open,
            b'}' => Token::Close,
            _ => {
                i += 1;
                continue;
            }
        };

        if text_start < i {
            tokens.push(Token::Text(&template[text_start..i]));
        }

        match brace {
            Token::Open => match placeholder_at(&template[i..]) {
                Some(key) => {
                    tokens.push(Token::Placeholder(key));
                    i += key.len() + 2;
                }
                None => {
                    tokens.push(Token::Open);
                    i += 1;
                }
            },
            _ => {
                tokens.push(Token::Close);
                i += 1;
            }
        }
        text_start = i;
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&template[text_start..]));
    }

    tokens
}

/// Escapes every brace that is not part of a recognized placeholder.
///
/// Already sanitized input comes back unchanged.
pub fn sanitize_format(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for token in tokenize(raw) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Placeholder(key) => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
            Token::Open => out.push_str("{open}"),
            Token::Close => out.push_str("{close}"),
        }
    }
    out
}

/// Normalizes a time template to a single `{:<spec>}` group.
///
/// The first `{` directly followed by `:` opens the group. The `}` that
/// brings nesting back to the depth of that opening closes it. A `}` seen
/// before any opening never closes anything. A missing opening is
/// prepended as `{:` and a missing closing is appended as `}`. All other
/// braces are removed.
pub fn sanitize_time_format(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut depth: isize = 0;
    let mut open: Option<(usize, isize)> = None;
    let mut close: Option<usize> = None;

    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'{' => {
                if open.is_none() && bytes.get(i + 1) == Some(&b':') {
                    open = Some((i, depth));
                }
                depth += 1;
            }
            b'}' => {
                depth -= 1;
                if let Some((_, open_depth)) = open {
                    if open_depth == depth {
                        close = Some(i);
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    let open_at = open.map(|(i, _)| i);
    let mut out = String::with_capacity(raw.len() + 3);
    if open_at.is_none() {
        out.push_str("{:");
    }
    for (i, c) in raw.char_indices() {
        let is_group_brace = Some(i) == open_at || Some(i) == close;
        if (c == '{' || c == '}') && !is_group_brace {
            continue;
        }
        out.push(c);
    }
    if close.is_none() {
        out.push('}');
    }
    out
}

/// Splits a sanitized time template into `(prefix, spec, suffix)`.
///
/// Returns `None` when the template has no `{:...}` group.
pub fn split_time_template(template: &str) -> Option<(&str, &str, &str)> {
    let start = template.find("{:")?;
    let rest = &template[start + 2..];
    let end = rest.rfind('}')?;
    Some((&template[..start], &rest[..end], &rest[end + 1..]))
}
