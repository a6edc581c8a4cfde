/// Routing class of the current section, derived from its lowercased
/// heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Warning signs; list items go into the alert wrapper.
    Danger,
    /// Things the reader can do; list items go into the info wrapper.
    Actionable,
    /// Closing disclaimer; paragraphs render in the disclaimer style.
    Disclaimer,
    Other,
}

pub const DANGER_SECTIONS: &[&str] = &[
    "get medical help",
    "get medical care",
    "red flag",
    "when to seek",
];

pub const ACTIONABLE_SECTIONS: &[&str] = &[
    "what you can do now",
    "direct answer",
    "step",
    "immediate relief",
];

pub const DISCLAIMER_SECTIONS: &[&str] = &["disclaimer"];

impl SectionKind {
    /// Classifies a lowercased section name. Danger wins over actionable.
    pub fn of(section: &str) -> Self {
        let matches = |phrases: &[&str]| phrases.iter().any(|p| section.contains(p));
        if matches(DANGER_SECTIONS) {
            SectionKind::Danger
        } else if matches(ACTIONABLE_SECTIONS) {
            SectionKind::Actionable
        } else if matches(DISCLAIMER_SECTIONS) {
            SectionKind::Disclaimer
        } else {
            SectionKind::Other
        }
    }

    /// Classifies an optional section; no section routes like `Other`.
    pub fn of_current(section: Option<&str>) -> Self {
        section.map_or(SectionKind::Other, Self::of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("when to get medical help", SectionKind::Danger)]
    #[case("red flags", SectionKind::Danger)]
    #[case("when to get medical care", SectionKind::Danger)]
    #[case("when to seek medical help", SectionKind::Danger)]
    #[case("when to seek medical care", SectionKind::Danger)]
    #[case("when to seek care", SectionKind::Danger)]
    #[case("what you can do now (steps + precautions)", SectionKind::Actionable)]
    #[case("immediate relief", SectionKind::Actionable)]
    #[case("direct answer", SectionKind::Actionable)]
    #[case("next steps", SectionKind::Actionable)]
    #[case("disclaimer", SectionKind::Disclaimer)]
    #[case("brief empathy", SectionKind::Other)]
    #[case("keywords", SectionKind::Other)]
    fn classifies_sections(#[case] section: &str, #[case] expected: SectionKind) {
        assert_eq!(SectionKind::of(section), expected);
    }

    #[test]
    fn danger_takes_precedence() {
        assert_eq!(
            SectionKind::of("steps to get medical help"),
            SectionKind::Danger
        );
    }

    #[test]
    fn no_section_is_other() {
        assert_eq!(SectionKind::of_current(None), SectionKind::Other);
    }
}
