//! Markup escaping and name checks.

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());
static CAMEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// Escape text content: `&`, `<`, `>`.
pub fn text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

/// Escape an attribute value: text escapes plus `"` as `&#34;`.
pub fn attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, is_attr: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (is_attr && c == '"');
    if !s.contains(needs) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if is_attr => out.push_str("&#34;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// `paddingLeft` → `padding-left`, `font_size` → `font_size`, `a.b` → `a-b`.
pub fn camel_to_dash(s: &str) -> String {
    let dashed = NON_WORD.replace_all(s, "-");
    CAMEL.replace_all(&dashed, "$1-$2").to_lowercase()
}

/// Whether `name` can be written as a tag or attribute name as is.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '='))
}
