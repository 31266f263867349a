use crate::fields::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Field(FieldKey),
    Unknown,
}

/// Maps an idle-state utterance to the field the user wants to change.
///
/// The state machine only depends on this trait, so the keyword heuristic
/// below can be swapped for a model-backed classifier.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Intent;
}

const TRIGGER_VERBS: &[&str] = &["change", "update"];

// Checked top to bottom; the first hit wins when several fields are named.
const FIELD_INDICATORS: &[(&str, FieldKey)] = &[
    ("email", FieldKey::Email),
    ("address", FieldKey::Address),
    ("first name", FieldKey::FirstName),
    ("last name", FieldKey::LastName),
    ("birthday", FieldKey::Birthday),
    ("birth date", FieldKey::Birthday),
];

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    verbs: Vec<&'static str>,
    indicators: Vec<(&'static str, FieldKey)>,
}

impl KeywordClassifier {
    pub fn new(
        verbs: impl IntoIterator<Item = &'static str>,
        indicators: impl IntoIterator<Item = (&'static str, FieldKey)>,
    ) -> Self {
        Self {
            verbs: verbs.into_iter().collect(),
            indicators: indicators.into_iter().collect(),
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(
            TRIGGER_VERBS.iter().copied(),
            FIELD_INDICATORS.iter().copied(),
        )
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Intent {
        let text = text.to_lowercase();

        if !self.verbs.iter().any(|verb| text.contains(verb)) {
            return Intent::Unknown;
        }

        self.indicators
            .iter()
            .find(|(indicator, _)| text.contains(indicator))
            .map(|(_, field)| Intent::Field(*field))
            .unwrap_or(Intent::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Intent {
        KeywordClassifier::default().classify(text)
    }

    #[test]
    fn verb_plus_indicator_selects_field() {
        let cases = [
            ("email", FieldKey::Email),
            ("address", FieldKey::Address),
            ("first name", FieldKey::FirstName),
            ("last name", FieldKey::LastName),
            ("birthday", FieldKey::Birthday),
            ("birth date", FieldKey::Birthday),
        ];

        for verb in ["change", "update"] {
            for (indicator, field) in cases {
                let text = format!("please {verb} my {indicator}");
                assert_eq!(classify(&text), Intent::Field(field), "{text}");
            }
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("UPDATE My Email"), Intent::Field(FieldKey::Email));
        assert_eq!(
            classify("I'd like to Change my Last Name"),
            Intent::Field(FieldKey::LastName)
        );
    }

    #[test]
    fn missing_verb_is_unknown() {
        for text in [
            "my email is wrong",
            "what is my address",
            "first name",
            "birthday party",
            "tell me a joke",
            "",
        ] {
            assert_eq!(classify(text), Intent::Unknown, "{text}");
        }
    }

    #[test]
    fn verb_without_field_is_unknown() {
        assert_eq!(classify("change my password"), Intent::Unknown);
        assert_eq!(classify("update everything"), Intent::Unknown);
    }

    #[test]
    fn earlier_indicator_wins() {
        assert_eq!(
            classify("update my last name and email"),
            Intent::Field(FieldKey::Email)
        );
        assert_eq!(
            classify("change birthday and address"),
            Intent::Field(FieldKey::Address)
        );
        assert_eq!(
            classify("change first name or last name"),
            Intent::Field(FieldKey::FirstName)
        );
    }
}
