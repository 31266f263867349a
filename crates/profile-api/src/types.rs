use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A user profile as returned by the profile service.
///
/// Only `id` is guaranteed; every other field is kept verbatim so callers can
/// merge whatever fragment the service sends back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Profile {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) fn parse_profile(bytes: &[u8]) -> Result<Profile, Error> {
    match serde_json::from_slice::<Profile>(bytes) {
        Ok(profile) => Ok(profile),
        Err(err) => match api_error_message(bytes) {
            Some(message) => Err(Error::Api(message)),
            None => Err(Error::Json(err)),
        },
    }
}

/// Extracts the message of an `{"error": ...}` or `{"message": ...}` body.
pub(crate) fn api_error_message(bytes: &[u8]) -> Option<String> {
    let response = serde_json::from_slice::<ApiErrorResponse>(bytes).ok()?;
    response.error.or(response.message)
}
