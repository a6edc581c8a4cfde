//! # Block Transformer
//!
//! Converts a raw assistant reply into presentation markup.
//!
//! ## Phases
//!
//! 1. **Pass-through** (`normalize::looks_like_markup`): input that already
//!    contains tags is returned unchanged, so rendering twice is harmless.
//! 2. **Normalization** (`normalize`): legacy rich-text control sequences
//!    and markdown emphasis become `<strong>`/`<em>`, then the text is split
//!    into trimmed, non-empty lines.
//! 3. **Classification** (`classify`): each line is classified on its own,
//!    first match wins.
//! 4. **Construction** (`builder`): a `ReplyBuilder` threads list, wrapper
//!    and section state through the lines and emits `Fragment`s.
//! 5. **Check and render** (`fragment`): the fragment stream is checked for
//!    well-formed nesting and joined into the final string.
//!
//! ## Error boundary
//!
//! [`to_markup`] never fails. Any [`TransformError`] from the phases above
//! is logged and replaced by [`fallback_markup`].

pub mod builder;
pub mod classify;
pub mod fragment;
pub mod normalize;
pub mod sections;

use std::sync::OnceLock;

pub use builder::{ParserState, ReplyBuilder};
pub use fragment::{Fragment, ItemStyle, ListKind, WrapperKind};

use crate::error::TransformError;

/// Initializes a pattern set once and hands out a shared reference to it.
pub(crate) fn compiled<T>(
    cell: &'static OnceLock<Result<T, regex::Error>>,
    init: impl FnOnce() -> Result<T, regex::Error>,
) -> Result<&'static T, TransformError> {
    cell.get_or_init(init)
        .as_ref()
        .map_err(|e| TransformError::Pattern(e.clone()))
}

/// Normalizes `raw` and builds its fragments. No pass-through check.
pub fn parse_reply(raw: &str) -> Result<Vec<Fragment>, TransformError> {
    let lines = normalize::normalize(raw)?;
    log::debug!("Normalized reply into {} lines", lines.len());

    let mut builder = ReplyBuilder::new();
    for line in &lines {
        builder.push(line)?;
    }
    Ok(builder.finish())
}

/// Fallible form of [`to_markup`].
pub fn try_to_markup(raw: &str) -> Result<String, TransformError> {
    if normalize::looks_like_markup(raw)? {
        log::debug!("Reply already contains markup, passing through");
        return Ok(raw.to_string());
    }

    let fragments = parse_reply(raw)?;
    fragment::check_nesting(&fragments)?;
    Ok(fragment::render(&fragments))
}

/// Converts a raw reply into markup.
///
/// Never fails: if the transformation hits an internal error the reply is
/// rendered by [`fallback_markup`] instead.
///
/// ```
/// use medreply_engine::to_markup;
///
/// let markup = to_markup("1. Sip water\n2. Sit upright");
/// assert!(markup.starts_with(r#"<ol class="reply-list">"#));
/// assert_eq!(to_markup(&markup), markup);
/// ```
pub fn to_markup(raw: &str) -> String {
    recover(raw, try_to_markup)
}

fn recover(raw: &str, attempt: impl FnOnce(&str) -> Result<String, TransformError>) -> String {
    attempt(raw).unwrap_or_else(|e| {
        log::warn!("Reply transformation failed, rendering as plain text: {e}");
        fallback_markup(raw)
    })
}

/// Renders `raw` as one escaped paragraph with a `<br>` per newline.
pub fn fallback_markup(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let escaped = html_escape::encode_text(&normalized);
    format!("<p>{}</p>", escaped.replace('\n', "<br>"))
}
