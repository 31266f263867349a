use crate::types::{Author, Message};

/// Append-only log of the conversation. Messages are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended at or after `mark` (a previous [`Transcript::len`]).
    pub fn since(&self, mark: usize) -> &[Message] {
        self.messages.get(mark..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Plain-text rendering, one `author: text` line per message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            let who = match message.author {
                Author::User => "user",
                Author::Assistant => "assistant",
            };
            out.push_str(who);
            out.push_str(": ");
            out.push_str(&message.text);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_tail() {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant("hi"));
        let mark = transcript.len();
        transcript.push(Message::user("change my email"));
        transcript.push(Message::assistant("Sure, what is your new email?"));

        assert_eq!(transcript.since(mark).len(), 2);
        assert_eq!(transcript.since(mark)[0], Message::user("change my email"));
        assert!(transcript.since(99).is_empty());
    }

    #[test]
    fn render_lists_messages_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::assistant("Hi! Need help editing your profile?"));
        transcript.push(Message::user("tell me a joke"));

        insta::assert_snapshot!(transcript.render(), @r###"
        assistant: Hi! Need help editing your profile?
        user: tell me a joke
        "###);
    }
}
