use crate::error::TransformError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub const fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// Bordered container grouping the items of a recognized section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    Alert,
    Info,
}

impl WrapperKind {
    pub const fn class(self) -> &'static str {
        match self {
            WrapperKind::Alert => "callout callout-alert",
            WrapperKind::Info => "callout callout-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyle {
    Plain,
    /// Warning-prefixed item inside a danger span.
    Danger,
    /// Check-prefixed actionable item.
    Check,
}

/// One piece of output markup. Text payloads are already emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Title { icon: &'static str, text: String },
    Heading { icon: &'static str, text: String },
    ListOpen(ListKind),
    Item { style: ItemStyle, text: String },
    ListClose(ListKind),
    WrapperOpen(WrapperKind),
    WrapperClose(WrapperKind),
    Paragraph(String),
    Disclaimer(String),
}

fn with_icon(icon: &str, text: &str) -> String {
    if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    }
}

impl Fragment {
    pub fn render(&self) -> String {
        match self {
            Fragment::Title { icon, text } => {
                format!(r#"<h2 class="reply-title">{}</h2>"#, with_icon(icon, text))
            }
            Fragment::Heading { icon, text } => {
                format!(r#"<h3 class="reply-heading">{}</h3>"#, with_icon(icon, text))
            }
            Fragment::ListOpen(kind) => format!(r#"<{} class="reply-list">"#, kind.tag()),
            Fragment::ListClose(kind) => format!("</{}>", kind.tag()),
            Fragment::Item { style, text } => match style {
                ItemStyle::Plain => format!("<li>{text}</li>"),
                ItemStyle::Danger => {
                    format!(r#"<li><span class="danger-item">⚠️ {text}</span></li>"#)
                }
                ItemStyle::Check => format!("<li>✅ {text}</li>"),
            },
            Fragment::WrapperOpen(kind) => format!(r#"<div class="{}">"#, kind.class()),
            Fragment::WrapperClose(_) => "</div>".to_string(),
            Fragment::Paragraph(text) => format!("<p>{text}</p>"),
            Fragment::Disclaimer(text) => format!(r#"<p class="disclaimer"><em>{text}</em></p>"#),
        }
    }
}

/// Renders fragments in order, one per line.
pub fn render(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(Fragment::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    List(ListKind),
    Wrapper(WrapperKind),
}

/// Checks that fragments form well-nested markup.
///
/// Lists may sit at top level or inside a wrapper; wrappers only at top
/// level; items only directly inside a list; headings and paragraphs never
/// inside a list. Everything opened must be closed.
pub fn check_nesting(fragments: &[Fragment]) -> Result<(), TransformError> {
    let mut stack: Vec<Open> = Vec::new();
    let fail = |index: usize, reason: &str| TransformError::Unbalanced {
        index,
        reason: reason.to_string(),
    };

    for (index, fragment) in fragments.iter().enumerate() {
        let in_list = matches!(stack.last(), Some(Open::List(_)));
        match fragment {
            Fragment::ListOpen(kind) => {
                if in_list {
                    return Err(fail(index, "list opened inside a list"));
                }
                stack.push(Open::List(*kind));
            }
            Fragment::ListClose(kind) => {
                if stack.pop() != Some(Open::List(*kind)) {
                    return Err(fail(index, "list close does not match open element"));
                }
            }
            Fragment::WrapperOpen(kind) => {
                if !stack.is_empty() {
                    return Err(fail(index, "wrapper opened inside another element"));
                }
                stack.push(Open::Wrapper(*kind));
            }
            Fragment::WrapperClose(kind) => {
                if stack.pop() != Some(Open::Wrapper(*kind)) {
                    return Err(fail(index, "wrapper close does not match open element"));
                }
            }
            Fragment::Item { .. } => {
                if !in_list {
                    return Err(fail(index, "item outside a list"));
                }
            }
            Fragment::Title { .. }
            | Fragment::Heading { .. }
            | Fragment::Paragraph(_)
            | Fragment::Disclaimer(_) => {
                if in_list {
                    return Err(fail(index, "block element inside a list"));
                }
            }
        }
    }

    if stack.is_empty() {
        Ok(())
    } else {
        Err(fail(fragments.len(), "elements left open at end of input"))
    }
}
