use crate::types::{DialogState, Message};

#[derive(Debug, serde::Serialize, Clone, PartialEq)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type")]
pub enum AssistantEvent {
    #[serde(rename = "messageAppended")]
    MessageAppended { session_id: String, message: Message },
    #[serde(rename = "stateChanged")]
    StateChanged {
        session_id: String,
        state: DialogState,
    },
    #[serde(rename = "listeningChanged")]
    ListeningChanged { session_id: String, listening: bool },
}

impl AssistantEvent {
    pub fn session_id(&self) -> &str {
        match self {
            AssistantEvent::MessageAppended { session_id, .. }
            | AssistantEvent::StateChanged { session_id, .. }
            | AssistantEvent::ListeningChanged { session_id, .. } => session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKey;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = AssistantEvent::StateChanged {
            session_id: "s-1".to_string(),
            state: DialogState::AwaitingValue(FieldKey::Email),
        };
        insta::assert_json_snapshot!(event, @r###"
        {
          "type": "stateChanged",
          "session_id": "s-1",
          "state": {
            "type": "awaitingValue",
            "field": "email"
          }
        }
        "###);
    }
}
