mod conversation;

pub use conversation::*;

pub(crate) fn conversation_span(session_id: &str) -> tracing::Span {
    tracing::info_span!("conversation", session_id = %session_id)
}
