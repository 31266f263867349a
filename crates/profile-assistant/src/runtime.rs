use tokio::sync::mpsc;

use crate::events::AssistantEvent;

/// Where a conversation reports what happened. Implemented by whatever
/// renders the chat: a CLI printer, a UI bridge, or a test collector.
pub trait AssistantRuntime: Send + Sync + 'static {
    fn emit(&self, event: AssistantEvent);
}

impl AssistantRuntime for mpsc::UnboundedSender<AssistantEvent> {
    fn emit(&self, event: AssistantEvent) {
        let _ = self.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRuntime;

impl AssistantRuntime for NoopRuntime {
    fn emit(&self, _event: AssistantEvent) {}
}
