use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::Instrument;

use crate::actors::conversation_span;
use crate::conversation::Conversation;
use crate::transcript::Transcript;
use crate::types::{DialogState, Message, Utterance};
use crate::{Error, Result};

pub enum ConversationMsg {
    Submit(Utterance, RpcReplyPort<Vec<Message>>),
    Deliver(Utterance),
    GetState(RpcReplyPort<DialogState>),
    GetTranscript(RpcReplyPort<Transcript>),
}

pub struct ConversationArgs {
    pub conversation: Conversation,
}

/// Serializes turns: the mailbox hands over one message at a time and the
/// dispatch is awaited inside `handle`, so a second utterance is only read
/// once the first one has its reply.
pub struct ConversationActor;

#[ractor::async_trait]
impl Actor for ConversationActor {
    type Msg = ConversationMsg;
    type State = Conversation;
    type Arguments = ConversationArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> std::result::Result<Self::State, ActorProcessingErr> {
        let span = conversation_span(args.conversation.session_id());
        let _guard = span.enter();
        tracing::info!("conversation_started");
        Ok(args.conversation)
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        let span = conversation_span(state.session_id());
        let _guard = span.enter();
        tracing::info!(messages = state.transcript().len(), "conversation_stopped");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> std::result::Result<(), ActorProcessingErr> {
        match message {
            ConversationMsg::Submit(utterance, reply) => {
                let appended = run_turn(state, utterance).await;
                let _ = reply.send(appended);
            }
            ConversationMsg::Deliver(utterance) => {
                run_turn(state, utterance).await;
            }
            ConversationMsg::GetState(reply) => {
                let _ = reply.send(state.state());
            }
            ConversationMsg::GetTranscript(reply) => {
                let _ = reply.send(state.transcript().clone());
            }
        }
        Ok(())
    }
}

async fn run_turn(conversation: &mut Conversation, utterance: Utterance) -> Vec<Message> {
    let span = conversation_span(conversation.session_id());
    async {
        let source = utterance.source();
        let appended = conversation.submit(utterance).await;
        tracing::debug!(?source, appended = appended.len(), "turn_completed");
        appended
    }
    .instrument(span)
    .await
}

/// Typed front door to a running [`ConversationActor`].
#[derive(Clone)]
pub struct ConversationHandle {
    actor: ActorRef<ConversationMsg>,
    session_id: String,
}

impl ConversationHandle {
    pub async fn spawn(conversation: Conversation) -> Result<Self> {
        let session_id = conversation.session_id().to_string();
        let (actor, _handle) =
            Actor::spawn(None, ConversationActor, ConversationArgs { conversation }).await?;
        Ok(Self { actor, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Queues the utterance behind any turn in progress and waits for its
    /// own reply messages.
    pub async fn submit(&self, utterance: Utterance) -> Result<Vec<Message>> {
        ractor::call!(self.actor, ConversationMsg::Submit, utterance)
            .map_err(|e| Error::Actor(e.to_string()))
    }

    /// Fire-and-forget variant of [`Self::submit`]; results are observed
    /// through the runtime's events.
    pub fn deliver(&self, utterance: Utterance) -> Result<()> {
        self.actor
            .cast(ConversationMsg::Deliver(utterance))
            .map_err(|e| Error::Actor(e.to_string()))
    }

    pub async fn state(&self) -> Result<DialogState> {
        ractor::call!(self.actor, ConversationMsg::GetState).map_err(|e| Error::Actor(e.to_string()))
    }

    pub async fn transcript(&self) -> Result<Transcript> {
        ractor::call!(self.actor, ConversationMsg::GetTranscript)
            .map_err(|e| Error::Actor(e.to_string()))
    }

    pub fn stop(&self) {
        self.actor.stop(None);
    }
}
