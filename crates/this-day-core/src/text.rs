//! Display sanitization for event text coming from the feed.
//!
//! The feed may carry inline HTML and bracketed citation markers. Before
//! display, [`clean_text`]:
//!
//! 1. drops every `<...>` tag,
//! 2. drops numeric citation markers such as `[12]`,
//! 3. collapses whitespace runs to a single space and trims.
//!
//! An unterminated `<` or `[` is kept as literal text.

/// Sanitize feed text for display.
pub fn clean_text(input: &str) -> String {
    let stripped = strip_citations(&strip_tags(input));
    collapse_whitespace(&stripped)
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

fn strip_citations(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 && after[digits..].starts_with(']') {
            rest = &after[digits + 1..];
        } else {
            out.push('[');
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
