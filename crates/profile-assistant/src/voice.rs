use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::actors::ConversationHandle;
use crate::events::AssistantEvent;
use crate::runtime::AssistantRuntime;
use crate::store::BoxFuture;
use crate::types::Utterance;
use crate::{Error, Result};

pub type RecognizerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A speech-to-text engine. Each call captures one utterance and resolves
/// with its final transcript, or `None` when nothing was heard.
pub trait SpeechRecognizer: Send + Sync {
    fn recognize<'a>(&'a self) -> BoxFuture<'a, std::result::Result<Option<String>, RecognizerError>>;
}

/// Receives finished voice utterances.
pub trait UtteranceSink: Send + Sync {
    fn deliver(&self, utterance: Utterance) -> Result<()>;
}

impl UtteranceSink for ConversationHandle {
    fn deliver(&self, utterance: Utterance) -> Result<()> {
        ConversationHandle::deliver(self, utterance)
    }
}

pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
    runtime: Arc<dyn AssistantRuntime>,
    session_id: String,
    listening: AtomicBool,
}

impl VoiceInput {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        runtime: Arc<dyn AssistantRuntime>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            recognizer,
            runtime,
            session_id: session_id.into(),
            listening: AtomicBool::new(false),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Captures one utterance and hands it to `sink`.
    ///
    /// Returns what was delivered; `None` if the recognizer heard nothing or
    /// only whitespace. The listening flag is cleared however this ends,
    /// including when the future is dropped.
    pub async fn listen(&self, sink: &dyn UtteranceSink) -> Result<Option<Utterance>> {
        if self
            .listening
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("voice_listen_rejected");
            return Err(Error::AlreadyListening);
        }

        let _listening = ListeningGuard::start(self);

        let text = self.recognizer.recognize().await.map_err(|error| {
            tracing::warn!(%error, "speech_recognition_failed");
            Error::Recognizer(error)
        })?;

        let Some(utterance) = text.map(Utterance::voice).filter(|u| !u.is_blank()) else {
            tracing::debug!("voice_nothing_heard");
            return Ok(None);
        };

        sink.deliver(utterance.clone())?;
        Ok(Some(utterance))
    }

    fn emit_listening(&self, listening: bool) {
        self.runtime.emit(AssistantEvent::ListeningChanged {
            session_id: self.session_id.clone(),
            listening,
        });
    }
}

struct ListeningGuard<'a> {
    input: &'a VoiceInput,
}

impl<'a> ListeningGuard<'a> {
    fn start(input: &'a VoiceInput) -> Self {
        input.emit_listening(true);
        Self { input }
    }
}

impl Drop for ListeningGuard<'_> {
    fn drop(&mut self) {
        self.input.listening.store(false, Ordering::Release);
        self.input.emit_listening(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    struct Fixed(Option<&'static str>);

    impl SpeechRecognizer for Fixed {
        fn recognize<'a>(
            &'a self,
        ) -> BoxFuture<'a, std::result::Result<Option<String>, RecognizerError>> {
            Box::pin(async move { Ok(self.0.map(String::from)) })
        }
    }

    struct Failing;

    impl SpeechRecognizer for Failing {
        fn recognize<'a>(
            &'a self,
        ) -> BoxFuture<'a, std::result::Result<Option<String>, RecognizerError>> {
            Box::pin(async { Err("microphone unavailable".into()) })
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<Utterance>>);

    impl UtteranceSink for Collect {
        fn deliver(&self, utterance: Utterance) -> Result<()> {
            self.0.lock().unwrap().push(utterance);
            Ok(())
        }
    }

    fn listening_events(rx: &mut mpsc::UnboundedReceiver<AssistantEvent>) -> Vec<bool> {
        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AssistantEvent::ListeningChanged { listening, .. } = event {
                seen.push(listening);
            }
        }
        seen
    }

    #[tokio::test]
    async fn delivers_transcript_as_voice_utterance() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let input = VoiceInput::new(Arc::new(Fixed(Some("change my email"))), Arc::new(tx), "s-1");
        let sink = Collect::default();

        let delivered = input.listen(&sink).await.unwrap();

        assert_eq!(delivered, Some(Utterance::voice("change my email")));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        assert!(!input.is_listening());
        assert_eq!(listening_events(&mut rx), vec![true, false]);
    }

    #[tokio::test]
    async fn blank_transcript_is_not_delivered() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let input = VoiceInput::new(Arc::new(Fixed(Some("  "))), Arc::new(tx), "s-1");
        let sink = Collect::default();

        assert_eq!(input.listen(&sink).await.unwrap(), None);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn recognizer_failure_clears_listening() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let input = VoiceInput::new(Arc::new(Failing), Arc::new(tx), "s-1");

        let err = input.listen(&Collect::default()).await.unwrap_err();

        assert!(matches!(err, Error::Recognizer(_)));
        assert!(!input.is_listening());
        assert_eq!(listening_events(&mut rx), vec![true, false]);
    }
}
