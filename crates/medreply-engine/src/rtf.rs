//! Minimal rich-text document helpers.
//!
//! The upstream generator is asked for a rich-text reply but sometimes
//! answers in plain text. [`ensure_rtf`] wraps such replies in a small
//! rich-text document so every reply reaches the transformer in one shape.

/// Header opening every wrapped document, including the bold title line.
pub const DOCUMENT_HEADER: &str =
    "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Arial;}}\\fs22\n\\b Medical Assistant Response\\b0\\par\n";

/// Longest line, in characters, still treated as a subheading.
pub const MAX_SUBHEADING_CHARS: usize = 80;

/// Whether `text` is already a rich-text document.
pub fn is_rtf(text: &str) -> bool {
    text.trim_start().starts_with("{\\rtf")
}

/// Escapes `\`, `{` and `}` for insertion into a rich-text body.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wraps plain text in a rich-text document, bolding short lines that end
/// with a colon.
pub fn wrap_plain_text(text: &str) -> String {
    let body = text
        .lines()
        .map(|line| {
            let escaped = escape_text(line);
            let trimmed = escaped.trim();
            if trimmed.ends_with(':') && trimmed.chars().count() <= MAX_SUBHEADING_CHARS {
                format!("\\b {escaped}\\b0")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("\\par\n");
    format!("{DOCUMENT_HEADER}{body}\n}}")
}

/// Returns the trimmed reply if it is rich text, otherwise wraps it.
pub fn ensure_rtf(text: &str) -> String {
    let trimmed = text.trim();
    if is_rtf(trimmed) {
        trimmed.to_string()
    } else {
        log::info!("Reply was not rich text, wrapping it with bold subheadings");
        wrap_plain_text(trimmed)
    }
}
