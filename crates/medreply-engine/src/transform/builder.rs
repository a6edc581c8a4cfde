use super::{
    classify::{LineKind, classify},
    fragment::{Fragment, ItemStyle, ListKind, WrapperKind},
    sections::SectionKind,
};
use crate::{emphasis::try_emphasize, error::TransformError, icons::icon_for};

/// State threaded through the line loop.
///
/// At most one list and one wrapper are open at a time. A list opened while
/// a wrapper is open belongs to that wrapper.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParserState {
    pub list: Option<ListKind>,
    pub wrapper: Option<WrapperKind>,
    /// Lowercased text of the most recent heading.
    pub current_section: Option<String>,
    pub title_emitted: bool,
}

/// Single-pass line classifier and fragment emitter.
#[derive(Debug, Default)]
pub struct ReplyBuilder {
    state: ParserState,
    out: Vec<Fragment>,
}

impl ReplyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn push(&mut self, line: &str) -> Result<(), TransformError> {
        match classify(line, self.state.title_emitted)? {
            LineKind::Title(text) => self.title(&text),
            LineKind::KeywordList { label, items } => self.keyword_list(&label, &items),
            LineKind::OrderedItem(content) => self.ordered_item(content),
            LineKind::UnorderedItem(content) => self.unordered_item(content),
            LineKind::Heading(text) => self.heading(&text),
            LineKind::Paragraph(content) => self.paragraph(content),
        }
    }

    /// Closes whatever is still open and returns the fragments.
    pub fn finish(mut self) -> Vec<Fragment> {
        // EOF flush
        self.close_list();
        self.close_wrapper();
        self.out
    }

    fn section(&self) -> SectionKind {
        SectionKind::of_current(self.state.current_section.as_deref())
    }

    fn title(&mut self, text: &str) -> Result<(), TransformError> {
        self.close_list();
        self.close_wrapper();
        self.out.push(Fragment::Title {
            icon: icon_for(text),
            text: try_emphasize(text)?,
        });
        self.state.title_emitted = true;
        Ok(())
    }

    fn keyword_list(&mut self, label: &str, items: &[String]) -> Result<(), TransformError> {
        self.close_list();
        self.close_wrapper();
        self.out.push(Fragment::Heading {
            icon: icon_for(label),
            text: try_emphasize(label)?,
        });
        if !items.is_empty() {
            self.open_list(ListKind::Unordered);
            for item in items {
                self.item(ItemStyle::Plain, item)?;
            }
            self.close_list();
        }
        self.state.current_section = Some(label.to_lowercase());
        Ok(())
    }

    fn ordered_item(&mut self, content: &str) -> Result<(), TransformError> {
        if self.section() == SectionKind::Actionable {
            self.open_wrapper(WrapperKind::Info);
        }
        self.open_list(ListKind::Ordered);
        self.item(ItemStyle::Plain, content)
    }

    fn unordered_item(&mut self, content: &str) -> Result<(), TransformError> {
        let style = match self.section() {
            SectionKind::Danger => {
                self.open_wrapper(WrapperKind::Alert);
                ItemStyle::Danger
            }
            SectionKind::Actionable => {
                self.open_wrapper(WrapperKind::Info);
                ItemStyle::Check
            }
            _ => ItemStyle::Plain,
        };
        self.open_list(ListKind::Unordered);
        self.item(style, content)
    }

    fn heading(&mut self, text: &str) -> Result<(), TransformError> {
        self.close_list();
        self.state.current_section = Some(text.to_lowercase());
        match self.section() {
            SectionKind::Danger => self.open_wrapper(WrapperKind::Alert),
            SectionKind::Actionable => self.open_wrapper(WrapperKind::Info),
            _ => self.close_wrapper(),
        }
        self.out.push(Fragment::Heading {
            icon: icon_for(text),
            text: try_emphasize(text)?,
        });
        Ok(())
    }

    fn paragraph(&mut self, content: &str) -> Result<(), TransformError> {
        self.close_list();
        let text = try_emphasize(content)?;
        if self.section() == SectionKind::Disclaimer {
            self.close_wrapper();
            self.out.push(Fragment::Disclaimer(text));
        } else {
            self.out.push(Fragment::Paragraph(text));
        }
        Ok(())
    }

    fn item(&mut self, style: ItemStyle, content: &str) -> Result<(), TransformError> {
        self.out.push(Fragment::Item {
            style,
            text: try_emphasize(content)?,
        });
        Ok(())
    }

    fn open_list(&mut self, kind: ListKind) {
        if self.state.list == Some(kind) {
            return;
        }
        self.close_list();
        self.out.push(Fragment::ListOpen(kind));
        self.state.list = Some(kind);
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.state.list.take() {
            self.out.push(Fragment::ListClose(kind));
        }
    }

    /// Switching wrappers also ends the open list, which lives inside the
    /// previous wrapper (or outside any wrapper).
    fn open_wrapper(&mut self, kind: WrapperKind) {
        if self.state.wrapper == Some(kind) {
            return;
        }
        self.close_list();
        self.close_wrapper();
        self.out.push(Fragment::WrapperOpen(kind));
        self.state.wrapper = Some(kind);
    }

    fn close_wrapper(&mut self) {
        if let Some(kind) = self.state.wrapper.take() {
            self.out.push(Fragment::WrapperClose(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::fragment::check_nesting;
    use pretty_assertions::assert_eq;

    fn build(lines: &[&str]) -> Vec<Fragment> {
        let mut builder = ReplyBuilder::new();
        for line in lines {
            builder.push(line).unwrap();
        }
        builder.finish()
    }

    fn plain(text: &str) -> Fragment {
        Fragment::Item {
            style: ItemStyle::Plain,
            text: text.to_string(),
        }
    }

    fn heading(icon: &'static str, text: &str) -> Fragment {
        Fragment::Heading {
            icon,
            text: text.to_string(),
        }
    }

    #[test]
    fn ordered_list_without_section_has_no_wrapper() {
        assert_eq!(
            build(&["1. one", "2. two"]),
            vec![
                Fragment::ListOpen(ListKind::Ordered),
                plain("one"),
                plain("two"),
                Fragment::ListClose(ListKind::Ordered),
            ]
        );
    }

    #[test]
    fn switching_list_kind_closes_previous_list() {
        assert_eq!(
            build(&["1. one", "- two"]),
            vec![
                Fragment::ListOpen(ListKind::Ordered),
                plain("one"),
                Fragment::ListClose(ListKind::Ordered),
                Fragment::ListOpen(ListKind::Unordered),
                plain("two"),
                Fragment::ListClose(ListKind::Unordered),
            ]
        );
    }

    #[test]
    fn danger_section_routes_items_to_alert_wrapper() {
        assert_eq!(
            build(&["Red Flags:", "- fainting"]),
            vec![
                Fragment::WrapperOpen(WrapperKind::Alert),
                heading("🚩", "Red Flags"),
                Fragment::ListOpen(ListKind::Unordered),
                Fragment::Item {
                    style: ItemStyle::Danger,
                    text: "fainting".to_string(),
                },
                Fragment::ListClose(ListKind::Unordered),
                Fragment::WrapperClose(WrapperKind::Alert),
            ]
        );
    }

    #[test]
    fn actionable_section_checks_unordered_items() {
        let out = build(&["Immediate relief:", "- sit down", "1. breathe slowly"]);
        assert_eq!(
            out,
            vec![
                Fragment::WrapperOpen(WrapperKind::Info),
                heading("💊", "Immediate relief"),
                Fragment::ListOpen(ListKind::Unordered),
                Fragment::Item {
                    style: ItemStyle::Check,
                    text: "sit down".to_string(),
                },
                Fragment::ListClose(ListKind::Unordered),
                Fragment::ListOpen(ListKind::Ordered),
                plain("breathe slowly"),
                Fragment::ListClose(ListKind::Ordered),
                Fragment::WrapperClose(WrapperKind::Info),
            ]
        );
    }

    #[test]
    fn plain_heading_closes_wrapper() {
        let out = build(&["Red flags:", "- fainting", "Brief empathy:", "Sorry to hear that."]);
        assert_eq!(
            &out[4..],
            &[
                Fragment::ListClose(ListKind::Unordered),
                Fragment::WrapperClose(WrapperKind::Alert),
                heading("💙", "Brief empathy"),
                Fragment::Paragraph("Sorry to hear that.".to_string()),
            ]
        );
    }

    #[test]
    fn paragraph_inside_wrapper_keeps_wrapper_open() {
        let out = build(&["When to get medical help:", "If it gets worse."]);
        assert_eq!(
            out,
            vec![
                Fragment::WrapperOpen(WrapperKind::Alert),
                heading("🚨", "When to get medical help"),
                Fragment::Paragraph("If it gets worse.".to_string()),
                Fragment::WrapperClose(WrapperKind::Alert),
            ]
        );
    }

    #[test]
    fn disclaimer_paragraph_style() {
        assert_eq!(
            build(&["Disclaimer:", "General information only."]),
            vec![
                heading("⚠️", "Disclaimer"),
                Fragment::Disclaimer("General information only.".to_string()),
            ]
        );
    }

    #[test]
    fn keyword_list_emits_self_contained_list() {
        let out = build(&["Keywords: fever, cough", "- extra"]);
        assert_eq!(
            out,
            vec![
                heading("🔑", "Keywords"),
                Fragment::ListOpen(ListKind::Unordered),
                plain("fever"),
                plain("cough"),
                Fragment::ListClose(ListKind::Unordered),
                Fragment::ListOpen(ListKind::Unordered),
                plain("extra"),
                Fragment::ListClose(ListKind::Unordered),
            ]
        );
    }

    #[test]
    fn keyword_label_without_items_is_heading_only() {
        assert_eq!(build(&["Important:"]), vec![heading("⭐", "Important")]);
    }

    #[test]
    fn title_emitted_once_and_closes_open_blocks() {
        let mut builder = ReplyBuilder::new();
        builder.push("- loose item").unwrap();
        builder.push("Medical Assistant Response").unwrap();
        builder.push("Medical Assistant Response").unwrap();
        assert!(builder.state().title_emitted);

        assert_eq!(
            builder.finish(),
            vec![
                Fragment::ListOpen(ListKind::Unordered),
                plain("loose item"),
                Fragment::ListClose(ListKind::Unordered),
                Fragment::Title {
                    icon: "🩺",
                    text: "Medical Assistant Response".to_string(),
                },
                Fragment::Paragraph("Medical Assistant Response".to_string()),
            ]
        );
    }

    #[test]
    fn heading_sets_lowercased_section() {
        let mut builder = ReplyBuilder::new();
        builder.push("What You Can Do Now:").unwrap();
        assert_eq!(
            builder.state().current_section.as_deref(),
            Some("what you can do now")
        );
        assert_eq!(builder.state().wrapper, Some(WrapperKind::Info));
    }

    #[test]
    fn finish_balances_everything() {
        let out = build(&["Steps:", "1. a", "Red flags:", "- b", "- c"]);
        assert!(check_nesting(&out).is_ok());
    }
}
