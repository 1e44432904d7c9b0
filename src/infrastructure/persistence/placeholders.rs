//! Placeholder rewriting from the `$N` dialect to SQLite's `?N`.

use std::borrow::Cow;

/// Rewrites every `$N` placeholder to `?N`.
///
/// The numeric index is kept, so a statement may reference the same parameter
/// twice or out of order. Text inside single-quoted literals and
/// double-quoted identifiers is copied untouched.
pub fn rewrite_placeholders(sql: &str) -> Cow<'_, str> {
    if !sql.contains('$') {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                out.push(c);
            }
            None if c == '$' && chars.peek().is_some_and(char::is_ascii_digit) => {
                out.push('?');
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    out.push(d);
                }
            }
            None => out.push(c),
        }
    }

    Cow::Owned(out)
}
