use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use super::compiled;
use super::normalize::strip_tags;
use crate::error::TransformError;

/// Phrase whose presence marks the reply's title line.
pub const TITLE_PHRASE: &str = "medical assistant response";

/// Classification of a single normalized line.
///
/// Variants are listed in priority order: the first that applies wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Title line, with its tag-stripped text.
    Title(String),
    /// `Keywords: a, b; c` style line. Items keep their `<strong>`/`<em>`
    /// markup when it opens and closes within the item, and are reduced to
    /// plain text otherwise.
    KeywordList { label: String, items: Vec<String> },
    OrderedItem(&'a str),
    UnorderedItem(&'a str),
    /// Colon-terminated heading, colon and tags removed.
    Heading(String),
    Paragraph(&'a str),
}

#[derive(Debug)]
struct Patterns {
    keyword_list: Regex,
    item_separator: Regex,
    ordered_item: Regex,
    unordered_item: Regex,
    inline_tag: Regex,
    /// Closing tags left over from an emphasized label.
    label_close: Regex,
}

fn patterns() -> Result<&'static Patterns, TransformError> {
    static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();
    compiled(&PATTERNS, || {
        Ok(Patterns {
            keyword_list: Regex::new(r"(?i)^(important words|important|keywords)\s*:\s*(.*)$")?,
            item_separator: Regex::new(r"[,;]")?,
            ordered_item: Regex::new(r"^\d+[.)]\s+(.+)$")?,
            unordered_item: Regex::new(r"^[-•*]\s+(.+)$")?,
            inline_tag: Regex::new(r"<(/?)(strong|em)>")?,
            label_close: Regex::new(r"^(?:\s*</(?:strong|em)>)+")?,
        })
    })
}

/// Classifies `line`. `title_emitted` disables title detection once the
/// title has been written.
pub fn classify(line: &str, title_emitted: bool) -> Result<LineKind<'_>, TransformError> {
    let p = patterns()?;
    let plain = strip_tags(line)?;
    let plain = plain.trim();

    if !title_emitted && plain.to_lowercase().contains(TITLE_PHRASE) {
        return Ok(LineKind::Title(plain.to_string()));
    }

    if let Some(caps) = p.keyword_list.captures(plain) {
        // Labels contain no colon, so the first one in `line` ends the label.
        let rest = line.split_once(':').map_or("", |(_, rest)| rest);
        let rest = p.label_close.replace(rest, "");
        let mut items = Vec::new();
        for item in p.item_separator.split(&rest) {
            let item = if inline_tags_balanced(p, item) {
                Cow::Borrowed(item)
            } else {
                strip_tags(item)?
            };
            let item = item.trim();
            if !strip_tags(item)?.trim().is_empty() {
                items.push(item.to_string());
            }
        }
        return Ok(LineKind::KeywordList {
            label: caps[1].to_string(),
            items,
        });
    }

    if let Some(content) = p.ordered_item.captures(line).and_then(|c| c.get(1)) {
        return Ok(LineKind::OrderedItem(content.as_str()));
    }

    if let Some(content) = p.unordered_item.captures(line).and_then(|c| c.get(1)) {
        return Ok(LineKind::UnorderedItem(content.as_str()));
    }

    if let Some(heading) = plain.strip_suffix(':')
        && !heading.trim().is_empty()
        && !has_strong_lead_in(line)?
    {
        return Ok(LineKind::Heading(heading.trim().to_string()));
    }

    Ok(LineKind::Paragraph(line))
}

fn inline_tags_balanced(p: &Patterns, text: &str) -> bool {
    let mut open = Vec::new();
    for caps in p.inline_tag.captures_iter(text) {
        let name = caps.get(2).map_or("", |m| m.as_str());
        if caps[1].is_empty() {
            open.push(name);
        } else if open.pop() != Some(name) {
            return false;
        }
    }
    open.is_empty()
}

/// A line that opens with a bold run followed by more body text, such as
/// `<strong>Note:</strong> keep the arm raised:`. A bold run that is the
/// whole heading, optionally followed by its colon, is not a lead-in.
fn has_strong_lead_in(line: &str) -> Result<bool, TransformError> {
    const OPEN: &str = "<strong>";
    const CLOSE: &str = "</strong>";

    let Some(rest) = line.strip_prefix(OPEN) else {
        return Ok(false);
    };
    let Some(close) = rest.find(CLOSE) else {
        return Ok(false);
    };
    let tail = strip_tags(&rest[close + CLOSE.len()..])?;
    let tail = tail.trim();
    Ok(!tail.is_empty() && tail != ":")
}
