use std::sync::Arc;

use crate::session::SessionSource;
use crate::store::ProfileStore;
use crate::types::{FieldPayload, Message};

pub const NOT_SIGNED_IN: &str = "You're not signed in or your session has expired.";

pub fn update_succeeded(label: &str, value: &str) -> String {
    format!("Your {label} has been updated to \"{value}\"!")
}

pub fn update_failed(label: &str) -> String {
    format!("Failed to update {label}. Try again later.")
}

/// Sends validated values to the profile store and turns the outcome into
/// the assistant's reply. Never fails: every error becomes a message.
#[derive(Clone)]
pub struct UpdateDispatcher {
    store: Arc<dyn ProfileStore>,
    session: Arc<dyn SessionSource>,
}

impl UpdateDispatcher {
    pub fn new(store: Arc<dyn ProfileStore>, session: Arc<dyn SessionSource>) -> Self {
        Self { store, session }
    }

    pub async fn dispatch(&self, label: &str, payload: &FieldPayload) -> Message {
        let Some(user_id) = self.session.current_user_id() else {
            tracing::info!(field = %payload.field, "dispatch_skipped_not_signed_in");
            return Message::assistant(NOT_SIGNED_IN);
        };

        match self.store.update_profile_field(&user_id, payload).await {
            Ok(fragment) => {
                self.session.merge_profile(fragment);
                tracing::info!(field = %payload.field, "profile_updated");
                Message::assistant(update_succeeded(label, &payload.value))
            }
            Err(error) => {
                tracing::warn!(field = %payload.field, %error, "profile_update_failed");
                Message::assistant(update_failed(label))
            }
        }
    }
}
