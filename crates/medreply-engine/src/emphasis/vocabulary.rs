//! Fixed term vocabularies for the emphasis pass.
//!
//! The five groups are disjoint: no term of one group contains a term of
//! another, so sequential replacement never wraps the same text twice.
//! Within a group, longer phrases come first so they win over their prefixes.

/// Urgency words that signal the reader must act now.
pub const EMERGENCY_WORDS: &[&str] = &[
    "life-threatening",
    "immediately",
    "right away",
    "urgently",
    "urgent",
    "asap",
];

/// Phrases that direct the reader to emergency services.
pub const CALL_PHRASES: &[&str] = &[
    "call your local emergency number",
    "call emergency services",
    "emergency department",
    "emergency room",
    "call 911",
    "call 112",
    "ambulance",
];

/// Symptoms that warrant emergency care.
pub const CRITICAL_SYMPTOMS: &[&str] = &[
    "severe allergic reaction",
    "loss of consciousness",
    "shortness of breath",
    "difficulty breathing",
    "trouble breathing",
    "suicidal thoughts",
    "severe bleeding",
    "severe head injury",
    "chest pressure",
    "chest pain",
    "seizure",
    "stroke",
];

/// Self-care guidance keywords.
pub const GUIDANCE_KEYWORDS: &[&str] = &[
    "seek medical care",
    "see a doctor",
    "stay hydrated",
    "drink fluids",
    "hydration",
    "monitor",
    "elevate",
    "avoid",
    "rest",
];

/// Common over-the-counter and home remedies.
pub const REMEDY_TERMS: &[&str] = &[
    "cold compress",
    "warm compress",
    "antihistamine",
    "acetaminophen",
    "paracetamol",
    "electrolytes",
    "ibuprofen",
    "ice pack",
    "lozenges",
    "saline",
    "honey",
];

#[cfg(test)]
mod tests {
    use super::*;

    const GROUPS: &[&[&str]] = &[
        EMERGENCY_WORDS,
        CALL_PHRASES,
        CRITICAL_SYMPTOMS,
        GUIDANCE_KEYWORDS,
        REMEDY_TERMS,
    ];

    #[test]
    fn groups_do_not_overlap() {
        for (i, group) in GROUPS.iter().enumerate() {
            for (j, other) in GROUPS.iter().enumerate() {
                if i == j {
                    continue;
                }
                for term in group.iter() {
                    for other_term in other.iter() {
                        assert!(
                            !term.contains(other_term),
                            "{term:?} contains {other_term:?} from another group"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn terms_are_lowercase() {
        for term in GROUPS.iter().flat_map(|g| g.iter()) {
            assert_eq!(*term, term.to_lowercase());
        }
    }
}
