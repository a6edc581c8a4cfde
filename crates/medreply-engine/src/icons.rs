/// Heading decoration table. Order matters: the first phrase contained in
/// the heading wins, so specific phrases precede the shorter ones they
/// contain.
pub const HEADING_ICONS: &[(&str, &str)] = &[
    ("medical assistant response", "🩺"),
    ("key details", "📋"),
    ("assumption", "🤔"),
    ("empathy", "💙"),
    ("what you can do now", "✅"),
    ("immediate relief", "💊"),
    ("direct answer", "💡"),
    ("step", "📝"),
    ("get medical help", "🚨"),
    ("get medical care", "🚨"),
    ("red flag", "🚩"),
    ("reassurance", "🤗"),
    ("follow-up", "❓"),
    ("keyword", "🔑"),
    ("important", "⭐"),
    ("disclaimer", "⚠️"),
];

/// Returns the icon for a heading, or `""` when no phrase matches.
pub fn icon_for(heading: &str) -> &'static str {
    let heading = heading.to_lowercase();
    HEADING_ICONS
        .iter()
        .find(|(phrase, _)| heading.contains(phrase))
        .map(|(_, icon)| *icon)
        .unwrap_or("")
}
