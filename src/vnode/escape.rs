//! HTML escaping shared by the virtual-node serializer and the headless host.
//!
//! Text is stored raw everywhere and escaped exactly once, at serialization.

use std::borrow::Cow;

/// Escape text content (`&`, `<`, `>`).
pub fn text(raw: &str) -> Cow<'_, str> {
    escape(raw, false)
}

/// Escape a double-quoted attribute value (`&`, `<`, `>`, `"`).
pub fn attribute(raw: &str) -> Cow<'_, str> {
    escape(raw, true)
}

fn escape(raw: &str, quotes: bool) -> Cow<'_, str> {
    let needs = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !raw.chars().any(needs) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
