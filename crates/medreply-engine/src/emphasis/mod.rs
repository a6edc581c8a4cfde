//! # Emphasis Pass
//!
//! Wraps clinically salient terms in style spans so the UI can highlight
//! them. Matching is case-insensitive and word-boundary delimited; the
//! matched text keeps its original casing.
//!
//! Rules run in the fixed order of [`RULES`], each on the output of the
//! previous one. The vocabularies in [`vocabulary`] are disjoint, so a term
//! is wrapped at most once.

pub mod vocabulary;

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::{error::TransformError, transform::compiled};

/// Visual style attached to an emphasized term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermStyle {
    /// Emergency wording: rendered as a critical highlight.
    Critical,
    /// Guidance and remedies: rendered as a strong highlight.
    Strong,
}

impl TermStyle {
    /// Class token carried by the wrapping span.
    pub const fn class(self) -> &'static str {
        match self {
            TermStyle::Critical => "term-critical",
            TermStyle::Strong => "term-strong",
        }
    }
}

/// One term group and the style its matches receive.
#[derive(Debug, Clone, Copy)]
pub struct EmphasisRule {
    pub name: &'static str,
    pub terms: &'static [&'static str],
    pub style: TermStyle,
}

/// Emphasis rules in application order.
pub const RULES: &[EmphasisRule] = &[
    EmphasisRule {
        name: "emergency-words",
        terms: vocabulary::EMERGENCY_WORDS,
        style: TermStyle::Critical,
    },
    EmphasisRule {
        name: "call-phrases",
        terms: vocabulary::CALL_PHRASES,
        style: TermStyle::Critical,
    },
    EmphasisRule {
        name: "critical-symptoms",
        terms: vocabulary::CRITICAL_SYMPTOMS,
        style: TermStyle::Critical,
    },
    EmphasisRule {
        name: "guidance-keywords",
        terms: vocabulary::GUIDANCE_KEYWORDS,
        style: TermStyle::Strong,
    },
    EmphasisRule {
        name: "remedy-terms",
        terms: vocabulary::REMEDY_TERMS,
        style: TermStyle::Strong,
    },
];

impl EmphasisRule {
    /// Builds `(?i)\b(?:term|...)\b` with longer terms first.
    fn pattern(&self) -> String {
        let mut terms: Vec<&str> = self.terms.to_vec();
        terms.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        format!(r"(?i)\b(?:{alternation})\b")
    }

    fn compile(&self) -> Result<CompiledRule, regex::Error> {
        Ok(CompiledRule {
            regex: Regex::new(&self.pattern())?,
            style: self.style,
        })
    }
}

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    style: TermStyle,
}

impl CompiledRule {
    fn apply(&self, text: &str) -> String {
        let class = self.style.class();
        self.regex
            .replace_all(text, |caps: &Captures| {
                format!(r#"<span class="{class}">{}</span>"#, &caps[0])
            })
            .into_owned()
    }
}

fn compiled_rules() -> Result<&'static [CompiledRule], TransformError> {
    static COMPILED: OnceLock<Result<Vec<CompiledRule>, regex::Error>> = OnceLock::new();
    compiled(&COMPILED, || RULES.iter().map(EmphasisRule::compile).collect()).map(Vec::as_slice)
}

/// Fallible form of [`emphasize`], used inside the block transformer so a
/// pattern failure surfaces at the transformer boundary.
pub(crate) fn try_emphasize(text: &str) -> Result<String, TransformError> {
    let rules = compiled_rules()?;
    let mut out = text.to_string();
    for rule in rules {
        out = rule.apply(&out);
    }
    Ok(out)
}

/// Wraps every vocabulary term in `text` in a styled span.
///
/// Total: text without vocabulary terms is returned unchanged.
///
/// ```
/// use medreply_engine::emphasize;
///
/// assert_eq!(
///     emphasize("Call 911 now"),
///     r#"<span class="term-critical">Call 911</span> now"#
/// );
/// ```
pub fn emphasize(text: &str) -> String {
    try_emphasize(text).unwrap_or_else(|e| {
        log::warn!("Emphasis pass skipped: {e}");
        text.to_string()
    })
}
