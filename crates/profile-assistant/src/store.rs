use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use hypr_http::HttpClient;
use hypr_profile_api::ProfileClient;

use crate::session::ProfileFragment;
use crate::types::FieldPayload;

pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence collaborator for profile updates.
///
/// Object-safe through the explicit `BoxFuture` return type, so the
/// dispatcher can hold an `Arc<dyn ProfileStore>`. Any error is treated the
/// same way by the caller.
pub trait ProfileStore: Send + Sync {
    fn update_profile_field<'a>(
        &'a self,
        user_id: &'a str,
        payload: &'a FieldPayload,
    ) -> BoxFuture<'a, Result<ProfileFragment, StoreError>>;
}

impl<C: HttpClient> ProfileStore for ProfileClient<C> {
    fn update_profile_field<'a>(
        &'a self,
        user_id: &'a str,
        payload: &'a FieldPayload,
    ) -> BoxFuture<'a, Result<ProfileFragment, StoreError>> {
        Box::pin(async move {
            let profile = self.update_profile(user_id, payload).await?;
            let mut fragment = profile.fields;
            fragment.insert("id".to_string(), serde_json::Value::String(profile.id));
            Ok(fragment)
        })
    }
}

/// Process-local profile store. Used by the offline CLI mode and by tests,
/// which can inject latency and failures and inspect the calls made.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<String, ProfileFragment>>,
    calls: Mutex<Vec<(String, FieldPayload)>>,
    failure: Mutex<Option<String>>,
    latency: Option<Duration>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every following update fails with `reason` until cleared with `None`.
    pub fn set_failure(&self, reason: Option<&str>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = reason.map(String::from);
    }

    pub fn calls(&self) -> Vec<(String, FieldPayload)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn profile(&self, user_id: &str) -> Option<ProfileFragment> {
        self.profiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    fn apply(&self, user_id: &str, payload: &FieldPayload) -> Result<ProfileFragment, StoreError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((user_id.to_string(), payload.clone()));

        if let Some(reason) = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(reason.into());
        }

        let mut profiles = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        let profile = profiles.entry(user_id.to_string()).or_insert_with(|| {
            let mut fresh = ProfileFragment::new();
            fresh.insert("id".to_string(), user_id.into());
            fresh
        });
        profile.insert(
            payload.field.as_str().to_string(),
            payload.value.clone().into(),
        );
        Ok(profile.clone())
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn update_profile_field<'a>(
        &'a self,
        user_id: &'a str,
        payload: &'a FieldPayload,
    ) -> BoxFuture<'a, Result<ProfileFragment, StoreError>> {
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.apply(user_id, payload)
        })
    }
}
