use crate::fields::FieldKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum UtteranceSource {
    Typed,
    Voice,
}

/// One unit of user input for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Utterance {
    text: String,
    source: UtteranceSource,
}

impl Utterance {
    pub fn new(text: impl Into<String>, source: UtteranceSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn typed(text: impl Into<String>) -> Self {
        Self::new(text, UtteranceSource::Typed)
    }

    pub fn voice(text: impl Into<String>) -> Self {
        Self::new(text, UtteranceSource::Voice)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> UtteranceSource {
        self.source
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Message {
    pub text: String,
    pub author: Author,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Assistant,
        }
    }
}

/// Pending-slot memory of a conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", content = "field", rename_all = "camelCase")]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingValue(FieldKey),
}

impl DialogState {
    pub fn pending_field(&self) -> Option<FieldKey> {
        match self {
            Self::Idle => None,
            Self::AwaitingValue(field) => Some(*field),
        }
    }
}

/// The `{key: value}` body sent to the profile service for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPayload {
    pub field: FieldKey,
    pub value: String,
}

impl serde::Serialize for FieldPayload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field.as_str(), &self.value)?;
        map.end()
    }
}
