//! Rule-based fallback — the deterministic tier of the suggestion resolver.
//!
//! A fixed table of keyword → remedy rules, scanned in declaration order;
//! the first rule whose keyword set intersects the lowercased answer text
//! wins. Declaration order is part of the observable contract: the fever
//! rule precedes the common-cold rule, and the nerves rule precedes the
//! sleep rule.
//!
//! The remedy text is illustrative educational material, not a verified
//! clinical model.

/// One entry in the fallback lookup table.
///
/// Keywords are lowercase substrings matched against the lowercased,
/// concatenated answer text. A rule's keyword set is never empty.
pub struct RemedyRule {
    pub keywords: &'static [&'static str],
    pub medicine: &'static str,
    pub description: &'static str,
}

/// The fallback lookup table. Built once, read-only for the process lifetime.
/// First match wins — order the entries from specific to general complaints.
pub static REMEDY_RULES: &[RemedyRule] = &[
    RemedyRule {
        keywords: &["fever", "high temperature", "hot"],
        medicine: "Belladonna",
        description: "Belladonna is traditionally suggested for sudden high fever with a flushed \
            face, radiating heat, and throbbing discomfort. It is commonly taken in 30C potency \
            at the first signs of fever.",
    },
    RemedyRule {
        keywords: &["cold", "runny nose", "sneezing", "congestion"],
        medicine: "Allium cepa",
        description: "Allium cepa is traditionally suggested for the common cold with a watery, \
            runny nose, frequent sneezing, and eyes that stream in warm rooms.",
    },
    RemedyRule {
        keywords: &["cough", "bronchitis"],
        medicine: "Bryonia",
        description: "Bryonia is traditionally suggested for a dry, painful cough that worsens \
            with movement, often with a desire to stay completely still.",
    },
    RemedyRule {
        keywords: &["headache", "migraine"],
        medicine: "Natrum muriaticum",
        description: "Natrum muriaticum is traditionally suggested for hammering headaches and \
            migraines, particularly those brought on by sun exposure or emotional strain.",
    },
    RemedyRule {
        keywords: &["anxiety", "nervous", "panic", "fright"],
        medicine: "Aconite",
        description: "Aconite is traditionally suggested for sudden anxiety, panic, or \
            restlessness that comes on quickly, often after a shock or fright.",
    },
    RemedyRule {
        keywords: &["insomnia", "sleep", "sleepless"],
        medicine: "Coffea cruda",
        description: "Coffea cruda is traditionally suggested for sleeplessness from an \
            overactive mind, when thoughts keep racing at bedtime.",
    },
    RemedyRule {
        keywords: &["indigestion", "nausea", "vomiting", "heartburn", "overeating"],
        medicine: "Nux vomica",
        description: "Nux vomica is traditionally suggested for indigestion, nausea, and \
            heartburn, especially after overeating or rich food.",
    },
    RemedyRule {
        keywords: &["injury", "bruise", "sprain", "trauma"],
        medicine: "Arnica montana",
        description: "Arnica montana is traditionally suggested for bruising, sprains, and \
            muscle soreness following minor injuries or overexertion.",
    },
    RemedyRule {
        keywords: &["sore throat", "throat", "tonsil"],
        medicine: "Hepar sulphuris",
        description: "Hepar sulphuris is traditionally suggested for a sore throat with \
            splinter-like pain on swallowing, often sensitive to cold air.",
    },
    RemedyRule {
        keywords: &["diarrhea", "diarrhoea", "food poisoning"],
        medicine: "Arsenicum album",
        description: "Arsenicum album is traditionally suggested for diarrhea and stomach upset \
            from spoiled food, with weakness and restlessness.",
    },
    RemedyRule {
        keywords: &["rash", "itch", "eczema", "skin"],
        medicine: "Sulphur",
        description: "Sulphur is traditionally suggested for itchy, burning skin complaints and \
            rashes that worsen with warmth and bathing.",
    },
    RemedyRule {
        keywords: &["joint", "stiff", "arthritis", "back pain"],
        medicine: "Rhus toxicodendron",
        description: "Rhus toxicodendron is traditionally suggested for joint stiffness and \
            aches that loosen up with gentle movement and worsen with rest.",
    },
];

/// Returned verbatim when no rule matches the answer text.
pub const DEFAULT_SUGGESTION: &str = "Based on the symptoms described, no single remedy stands \
    out. Commonly used homeopathic remedies include Arnica montana for minor injuries, Nux \
    vomica for digestive complaints, Aconite for sudden anxiety, and Belladonna for sudden \
    fevers. A qualified homeopathic practitioner can select a remedy matched to your full \
    symptom picture.";

/// Scans the table in declaration order and returns the first matching rule.
pub fn match_remedy(search_text: &str) -> Option<&'static RemedyRule> {
    let haystack = search_text.to_lowercase();
    REMEDY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
}

/// The fallback tier: first matching rule's description, or the fixed
/// default message when nothing matches.
pub fn fallback_suggestion(search_text: &str) -> String {
    match match_remedy(search_text) {
        Some(rule) => rule.description.to_string(),
        None => DEFAULT_SUGGESTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_has_keywords() {
        for rule in REMEDY_RULES {
            assert!(
                !rule.keywords.is_empty(),
                "rule for {} has no keywords",
                rule.medicine
            );
        }
    }

    #[test]
    fn test_every_keyword_is_lowercase() {
        for rule in REMEDY_RULES {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword '{kw}' is not lowercase");
            }
        }
    }

    #[test]
    fn test_table_has_twelve_entries() {
        assert_eq!(REMEDY_RULES.len(), 12);
    }

    #[test]
    fn test_high_temperature_matches_belladonna() {
        let rule = match_remedy("I have a high temperature and feel hot").unwrap();
        assert_eq!(rule.medicine, "Belladonna");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let upper = fallback_suggestion("I have a FEVER");
        let lower = fallback_suggestion("I have a fever");
        assert_eq!(upper, lower);
        assert!(upper.contains("Belladonna"));
    }

    #[test]
    fn test_fever_precedes_cold() {
        // Both rules match; the fever rule is declared first and must win.
        let rule = match_remedy("fever and a cold").unwrap();
        assert_eq!(rule.medicine, "Belladonna");
    }

    #[test]
    fn test_nerves_precede_sleep() {
        // "trouble sleeping" matches Coffea cruda, "nervous" matches Aconite;
        // the Aconite rule is declared earlier.
        let rule = match_remedy("trouble sleeping\nnervous").unwrap();
        assert_eq!(rule.medicine, "Aconite");
    }

    #[test]
    fn test_sleep_alone_matches_coffea() {
        let rule = match_remedy("trouble sleeping").unwrap();
        assert_eq!(rule.medicine, "Coffea cruda");
    }

    #[test]
    fn test_no_match_returns_default_verbatim() {
        assert_eq!(
            fallback_suggestion("my houseplant looks wilted"),
            DEFAULT_SUGGESTION
        );
    }

    #[test]
    fn test_description_names_the_medicine() {
        for rule in REMEDY_RULES {
            assert!(
                rule.description.contains(rule.medicine),
                "description for {} does not name it",
                rule.medicine
            );
        }
    }
}
