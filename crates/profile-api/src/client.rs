use hypr_http::{HttpClient, StatusError};

use crate::error::Error;
use crate::types::{Profile, api_error_message, parse_profile};

pub struct ProfileClient<C> {
    http: C,
}

impl<C: HttpClient> ProfileClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, Error> {
        let path = user_path(user_id)?;
        let bytes = self.http.get(&path).await.map_err(http_error)?;
        parse_profile(&bytes)
    }

    /// Partially updates the user's profile. `fields` is sent as the JSON
    /// body, e.g. `{"email": "john@example.com"}`.
    pub async fn update_profile<T: serde::Serialize + ?Sized>(
        &self,
        user_id: &str,
        fields: &T,
    ) -> Result<Profile, Error> {
        let path = user_path(user_id)?;
        let body = serde_json::to_vec(fields)?;
        let bytes = self
            .http
            .patch(&path, body)
            .await
            .map_err(http_error)?;
        parse_profile(&bytes)
    }
}

fn http_error(err: hypr_http::Error) -> Error {
    if let Some(status) = err.downcast_ref::<StatusError>()
        && let Some(message) = api_error_message(status.body.as_bytes())
    {
        return Error::Api(message);
    }
    Error::Http(err)
}

fn user_path(user_id: &str) -> Result<String, Error> {
    if user_id.trim().is_empty() {
        return Err(Error::MissingUserId);
    }
    Ok(format!("/api/users/{}", urlencoding::encode(user_id)))
}
