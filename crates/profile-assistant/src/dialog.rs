use crate::fields::{FieldKey, FieldRegistry};
use crate::intent::{Intent, IntentClassifier, KeywordClassifier};
use crate::types::{DialogState, FieldPayload};
use crate::validate::ValidationResult;

pub const DEFAULT_FALLBACK: &str = "Sorry, I didn't understand. Try saying 'change my email'.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Ask the user something and move to `next`.
    Prompt { text: String, next: DialogState },
    /// A validated value is ready for the dispatcher.
    UpdateAttempted {
        field: FieldKey,
        payload: FieldPayload,
    },
    Fallback { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub next: DialogState,
    pub outcome: TurnOutcome,
}

/// Pure transition function of the dialogue.
///
/// It holds configuration only; the current [`DialogState`] is passed in and
/// the next one handed back, so the caller owns all mutable state.
pub struct DialogStateMachine {
    registry: FieldRegistry,
    classifier: Box<dyn IntentClassifier>,
    fallback: String,
}

impl DialogStateMachine {
    pub fn new(registry: FieldRegistry, classifier: impl IntentClassifier + 'static) -> Self {
        Self {
            registry,
            classifier: Box::new(classifier),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Returns `None` for blank input: nothing is appended and the state is
    /// left untouched.
    pub fn advance(&self, state: &DialogState, utterance: &str) -> Option<Turn> {
        if utterance.trim().is_empty() {
            return None;
        }

        let turn = match state {
            DialogState::Idle => self.classify(utterance),
            DialogState::AwaitingValue(field) => self.accept_value(*field, utterance),
        };

        Some(turn)
    }

    fn classify(&self, utterance: &str) -> Turn {
        let spec = match self.classifier.classify(utterance) {
            Intent::Field(field) => self.registry.lookup(field),
            Intent::Unknown => None,
        };

        match spec {
            Some(spec) => {
                tracing::debug!(field = %spec.key, "intent_classified");
                let next = DialogState::AwaitingValue(spec.key);
                Turn {
                    next,
                    outcome: TurnOutcome::Prompt {
                        text: spec.prompt.to_string(),
                        next,
                    },
                }
            }
            None => {
                tracing::debug!("intent_unknown");
                Turn {
                    next: DialogState::Idle,
                    outcome: TurnOutcome::Fallback {
                        text: self.fallback.clone(),
                    },
                }
            }
        }
    }

    fn accept_value(&self, field: FieldKey, utterance: &str) -> Turn {
        let Some(spec) = self.registry.lookup(field) else {
            // A slot for a field the registry no longer knows cannot be
            // filled; drop it and answer like an unknown request.
            tracing::warn!(%field, "pending_field_not_registered");
            return Turn {
                next: DialogState::Idle,
                outcome: TurnOutcome::Fallback {
                    text: self.fallback.clone(),
                },
            };
        };

        match spec.validate(utterance) {
            ValidationResult::Valid(value) => Turn {
                next: DialogState::Idle,
                outcome: TurnOutcome::UpdateAttempted {
                    field,
                    payload: spec.build_payload(value),
                },
            },
            ValidationResult::Invalid(reason) => {
                tracing::debug!(%field, "validation_failed");
                let next = DialogState::AwaitingValue(field);
                Turn {
                    next,
                    outcome: TurnOutcome::Prompt { text: reason, next },
                }
            }
        }
    }
}

impl Default for DialogStateMachine {
    fn default() -> Self {
        Self::new(FieldRegistry::default(), KeywordClassifier::default())
    }
}
