//! Shared HTTP plumbing for the platform API.
//!
//! Every endpoint returns the full updated resource as JSON, so the
//! helpers here all decode the response body into the caller's type.
//! Resource-specific methods live in [`crate::plans`],
//! [`crate::profile`] and [`crate::relationships`].

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Authenticated HTTP client for one platform API.
#[derive(Clone)]
pub struct MentorlinkApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl MentorlinkApi {
    /// Create a client from configuration. Fails if no token is set.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| ApiError::InvalidConfig("a bearer token is required".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, config.api_url.clone(), token))
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool).
    pub fn with_client(client: reqwest::Client, api_url: String, token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// API base URL (e.g. `http://localhost:5000/api`).
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The bearer token this client authenticates with.
    pub fn token(&self) -> &str {
        &self.token
    }

    // ---- request helpers ----

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        let response = self.request(Method::GET, url.clone()).send().await?;
        Self::parse_response(&Method::GET, url.path(), response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        let response = self
            .request(method.clone(), url.clone())
            .json(body)
            .send()
            .await?;
        Self::parse_response(&method, url.path(), response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, ApiError> {
        let url = self.url(segments)?;
        let response = self.request(Method::DELETE, url.clone()).send().await?;
        Self::parse_response(&Method::DELETE, url.path(), response).await
    }

    // ---- private helpers ----

    /// Base URL with `segments` appended. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay within their own segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.api_url).map_err(|e| {
            ApiError::InvalidConfig(format!("invalid API URL '{}': {e}", self.api_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidConfig(format!("API URL '{}' cannot take a path", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path = url.path(), "Calling platform API");
        self.client.request(method, url).bearer_auth(&self.token)
    }

    /// Pass 2xx responses through; anything else becomes
    /// [`ApiError::Api`] carrying the status and raw body.
    async fn ensure_success(
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%method, path, status = status.as_u16(), "Platform API call failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(method, path, response).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                tracing::warn!(%method, path, error = %e, "Unexpected response body");
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Request(e)
            }
        })
    }
}

impl std::fmt::Debug for MentorlinkApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentorlinkApi")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
