use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{Error, HttpClient};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// `HttpClient` backed by `reqwest`, resolving every path against a fixed
/// API base and attaching an optional bearer token.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    api_base: Url,
    token: Option<String>,
}

impl ReqwestHttpClient {
    pub fn new(api_base: impl AsRef<str>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        let mut api_base = Url::parse(api_base.as_ref())?;
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        Ok(Self {
            client,
            api_base,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.api_base.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, Error> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            tracing::debug!(%status, "http_error_status");
            return Err(Box::new(StatusError {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }));
        }

        Ok(bytes.to_vec())
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self.url(path)?;
        self.send(self.client.get(url)).await
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, Error> {
        let url = self.url(path)?;
        let request = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request).await
    }
}

/// Non-success response. The body is kept so API crates can decode the
/// server's error payload.
#[derive(Debug)]
pub struct StatusError {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected status {}", self.status)
    }
}

impl std::error::Error for StatusError {}
