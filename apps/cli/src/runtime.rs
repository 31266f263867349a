use hypr_profile_assistant::{AssistantEvent, AssistantRuntime};

/// Replies are printed from the turn results; events only go to the log.
pub struct LogRuntime;

impl AssistantRuntime for LogRuntime {
    fn emit(&self, event: AssistantEvent) {
        match event {
            AssistantEvent::MessageAppended {
                session_id,
                message,
            } => {
                tracing::debug!(%session_id, author = ?message.author, "message_appended");
            }
            AssistantEvent::StateChanged { session_id, state } => {
                tracing::debug!(%session_id, ?state, "state_changed");
            }
            AssistantEvent::ListeningChanged {
                session_id,
                listening,
            } => {
                tracing::debug!(%session_id, listening, "listening_changed");
            }
        }
    }
}
