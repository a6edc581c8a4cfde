//! Structural normalization of raw replies.
//!
//! Turns a reply that may mix legacy rich-text control sequences and
//! markdown emphasis into an ordered list of trimmed, non-empty lines whose
//! only markup is `<strong>` and `<em>`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::compiled;
use crate::error::TransformError;

#[derive(Debug)]
struct Patterns {
    /// Any opening, closing or self-closing HTML-like tag.
    markup_tag: Regex,
    /// Header tables (`{\fonttbl ...}`, `{\colortbl ...}`, `{\stylesheet ...}`)
    /// and ignorable `{\* ...}` destinations, with one level of nested groups.
    header_noise: Regex,
    /// An escaped `\\`, `\{`, `\}` pair, or a control word with optional
    /// numeric parameter and delimiting space.
    control_word: Regex,
    /// `\uN` followed by an optional single-character fallback.
    unicode_escape: Regex,
    /// `\'hh` hex character escape.
    hex_escape: Regex,
    /// `\~`, `\-`, `\_` control symbols.
    control_symbol: Regex,
    md_strong: Regex,
    /// Single-asterisk emphasis; the opener must not be followed by whitespace.
    md_em: Regex,
    /// Escaped pair (kept as its literal) or a bare grouping brace (dropped).
    structural: Regex,
    any_tag: Regex,
}

fn patterns() -> Result<&'static Patterns, TransformError> {
    static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();
    compiled(&PATTERNS, || {
        Ok(Patterns {
            markup_tag: Regex::new(r"</?[a-zA-Z][a-zA-Z0-9]*(?:\s[^<>]*)?/?>")?,
            header_noise: Regex::new(
                r"\{\\(?:fonttbl|colortbl|stylesheet|\*)(?:[^{}]|\{[^{}]*\})*\}",
            )?,
            control_word: Regex::new(r"\\[\\{}]|\\([a-zA-Z]+)(-?\d+)? ?")?,
            unicode_escape: Regex::new(r"\\u(-?\d+) ?(?:\\'[0-9a-fA-F]{2}|\?)?")?,
            hex_escape: Regex::new(r"\\'([0-9a-fA-F]{2})")?,
            control_symbol: Regex::new(r"\\([~_-])")?,
            md_strong: Regex::new(r"\*\*(.+?)\*\*")?,
            md_em: Regex::new(r"\*([^\s*][^*\n]*?)\*")?,
            structural: Regex::new(r"\\([\\{}])|[{}]")?,
            any_tag: Regex::new(r"<[^>]+>")?,
        })
    })
}

/// Whether `text` already contains HTML tags and must not be processed again.
pub fn looks_like_markup(text: &str) -> Result<bool, TransformError> {
    Ok(patterns()?.markup_tag.is_match(text))
}

/// Removes every tag from `line`, leaving its text content.
pub fn strip_tags(line: &str) -> Result<Cow<'_, str>, TransformError> {
    Ok(patterns()?.any_tag.replace_all(line, ""))
}

/// Runs normalization steps 2 to 8 and returns the resulting lines.
pub fn normalize(raw: &str) -> Result<Vec<String>, TransformError> {
    let p = patterns()?;

    let text = p.header_noise.replace_all(raw, "");
    let text = convert_toggles(p, &text);
    let text = convert_markdown_emphasis(p, &text);
    let text = convert_paragraph_breaks(p, &text);
    let text = remove_control_words(p, &text);
    let text = remove_structural_chars(p, &text);

    Ok(split_lines(&text))
}

/// Bold/italic toggles become tags. Unpaired toggles stay unpaired.
fn convert_toggles(p: &Patterns, text: &str) -> String {
    p.control_word
        .replace_all(text, |caps: &Captures| {
            let word = caps.get(1).map(|m| m.as_str());
            let param = caps.get(2).map(|m| m.as_str());
            match (word, param) {
                (Some("b"), None) => "<strong>".to_string(),
                (Some("b"), Some("0")) => "</strong>".to_string(),
                (Some("i"), None) => "<em>".to_string(),
                (Some("i"), Some("0")) => "</em>".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn convert_markdown_emphasis(p: &Patterns, text: &str) -> String {
    let text = p.md_strong.replace_all(text, "<strong>$1</strong>");
    p.md_em.replace_all(&text, "<em>$1</em>").into_owned()
}

fn convert_paragraph_breaks(p: &Patterns, text: &str) -> String {
    p.control_word
        .replace_all(text, |caps: &Captures| {
            match (caps.get(1).map(|m| m.as_str()), caps.get(2)) {
                (Some("par" | "line"), None) => "\n".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Decodes character escapes, then drops every remaining control word.
fn remove_control_words(p: &Patterns, text: &str) -> String {
    let text = p.unicode_escape.replace_all(text, |caps: &Captures| {
        decode_unicode(&caps[1]).to_string()
    });
    let text = p.hex_escape.replace_all(&text, |caps: &Captures| {
        u8::from_str_radix(&caps[1], 16)
            .map(decode_ansi)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string()
    });
    let text = p.control_symbol.replace_all(&text, |caps: &Captures| {
        match &caps[1] {
            "~" => " ",
            "_" => "-",
            _ => "",
        }
        .to_string()
    });
    p.control_word
        .replace_all(&text, |caps: &Captures| {
            if caps.get(1).is_some() {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// `\uN` carries a signed 16-bit value; negative values wrap around.
fn decode_unicode(param: &str) -> char {
    param
        .parse::<i32>()
        .ok()
        .map(|n| if n < 0 { n + 65536 } else { n })
        .and_then(|n| u32::try_from(n).ok())
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Code points of bytes 0x80 to 0x9F in the Windows-1252 code page.
/// Unassigned bytes map to the replacement character.
const CP1252_HIGH: [char; 32] = [
    '€', '\u{FFFD}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{FFFD}', 'Ž',
    '\u{FFFD}', '\u{FFFD}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ',
    '\u{FFFD}', 'ž', 'Ÿ',
];

/// `\'hh` bytes are read in the `\ansi` code page, Windows-1252, which
/// agrees with Latin-1 outside 0x80 to 0x9F.
fn decode_ansi(byte: u8) -> char {
    match byte {
        0x80..=0x9F => CP1252_HIGH[usize::from(byte - 0x80)],
        _ => char::from(byte),
    }
}

fn remove_structural_chars(p: &Patterns, text: &str) -> String {
    p.structural
        .replace_all(text, |caps: &Captures| {
            caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default()
        })
        .replace('\r', "")
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
