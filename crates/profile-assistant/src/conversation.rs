use std::sync::Arc;

use crate::config::AssistantConfig;
use crate::dialog::{DialogStateMachine, TurnOutcome};
use crate::dispatch::UpdateDispatcher;
use crate::events::AssistantEvent;
use crate::runtime::{AssistantRuntime, NoopRuntime};
use crate::transcript::Transcript;
use crate::types::{DialogState, Message, Utterance};

/// One chat session: the dialogue state, its transcript, and the
/// collaborators a turn needs.
///
/// `submit` takes `&mut self`, so turns on a single conversation cannot
/// overlap. Wrap it in a [`crate::ConversationHandle`] to share it between
/// typed input and voice.
pub struct Conversation {
    session_id: String,
    machine: DialogStateMachine,
    dispatcher: UpdateDispatcher,
    runtime: Arc<dyn AssistantRuntime>,
    state: DialogState,
    transcript: Transcript,
}

impl Conversation {
    pub fn new(
        machine: DialogStateMachine,
        dispatcher: UpdateDispatcher,
        config: &AssistantConfig,
    ) -> Self {
        let mut transcript = Transcript::new();
        if let Some(greeting) = &config.greeting {
            transcript.push(Message::assistant(greeting.as_str()));
        }

        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            machine: machine.with_fallback(config.fallback_message.as_str()),
            dispatcher,
            runtime: Arc::new(NoopRuntime),
            state: DialogState::Idle,
            transcript,
        }
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn AssistantRuntime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Runs one turn and returns the messages it appended, in order. Blank
    /// input appends nothing.
    ///
    /// When a value validates, the state is back to `Idle` before the
    /// dispatcher is awaited.
    pub async fn submit(&mut self, utterance: Utterance) -> Vec<Message> {
        let Some(turn) = self.machine.advance(&self.state, utterance.text()) else {
            tracing::debug!(source = ?utterance.source(), "blank_utterance_ignored");
            return Vec::new();
        };

        let mark = self.transcript.len();
        self.append(Message::user(utterance.text()));
        self.set_state(turn.next);

        match turn.outcome {
            TurnOutcome::Prompt { text, .. } | TurnOutcome::Fallback { text } => {
                self.append(Message::assistant(text));
            }
            TurnOutcome::UpdateAttempted { field, payload } => {
                let label = self
                    .machine
                    .registry()
                    .lookup(field)
                    .map(|spec| spec.label)
                    .unwrap_or(field.as_str());
                let reply = self.dispatcher.dispatch(label, &payload).await;
                self.append(reply);
            }
        }

        self.transcript.since(mark).to_vec()
    }

    fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        self.runtime.emit(AssistantEvent::MessageAppended {
            session_id: self.session_id.clone(),
            message,
        });
    }

    fn set_state(&mut self, next: DialogState) {
        if self.state == next {
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "dialog_state_changed");
        self.state = next;
        self.runtime.emit(AssistantEvent::StateChanged {
            session_id: self.session_id.clone(),
            state: next,
        });
    }
}
