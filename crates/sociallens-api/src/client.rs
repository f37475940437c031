//! HTTP client for the dashboard REST API.
//!
//! Wraps `reqwest` with the dashboard's conventions: the base URL and bearer
//! token come from a small JSON config resolved once on first use, every
//! request carries `Authorization: Bearer <token>` and a JSON content type,
//! and every endpoint path is prefixed with `api/v1/`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sociallens_core::ConfigSource;
use tokio::sync::OnceCell;

use crate::config::{load_api_config, ApiConfig, ResolvedConfig};
use crate::error::ApiError;

/// Client for the dashboard REST API.
///
/// The remote configuration is resolved lazily on the first request and then
/// cached for the lifetime of the client. A failed load is not cached, so the
/// next request tries again; once loaded the configuration never changes, and
/// picking up a new token requires a new client.
pub struct ApiClient {
    http: Client,
    source: ConfigSource,
    config: OnceCell<ResolvedConfig>,
}

impl ApiClient {
    /// Creates a client that resolves its configuration from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        source: ConfigSource,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            http,
            source,
            config: OnceCell::new(),
        })
    }

    /// Creates a client with an already-known configuration (no lazy load).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`ApiError::InvalidUrl`] if `config.base_api_url` is not a valid URL.
    pub fn with_config(config: &ApiConfig, timeout_secs: u64) -> Result<Self, ApiError> {
        let resolved = ResolvedConfig::from_config(config)?;
        let mut client = Self::new(
            ConfigSource::Url(config.base_api_url.clone()),
            timeout_secs,
            "sociallens/0.1 (dashboard-client)",
        )?;
        client.config = OnceCell::new_with(Some(resolved));
        Ok(client)
    }

    /// `true` once the remote configuration has been resolved.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.initialized()
    }

    async fn resolved(&self) -> Result<&ResolvedConfig, ApiError> {
        self.config
            .get_or_try_init(|| async {
                let config = load_api_config(&self.http, &self.source).await?;
                tracing::debug!(source = %self.source, "resolved api configuration");
                ResolvedConfig::from_config(&config)
            })
            .await
    }

    /// `GET <endpoint>`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, &[], None).await
    }

    /// `GET <endpoint>?<query>`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, query, None)
            .await
    }

    /// `POST <endpoint>` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    /// `PUT <endpoint>` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    /// `PATCH <endpoint>` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, endpoint, &[], Some(body)).await
    }

    /// `DELETE <endpoint>`, discarding any response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, endpoint, &[], None)
            .await
            .map(|_| ())
    }

    /// Sends a request and decodes the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] if the remote configuration cannot be loaded.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status, carrying the server's
    ///   `detail` message or a generic fallback.
    /// - [`ApiError::Deserialize`] if the body does not match `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.send(method, endpoint, query, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }

    async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<serde_json::Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let config = self.resolved().await?;
        let url = config.endpoint_url(endpoint, query)?;
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&config.token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle_response(endpoint, response).await
    }

    /// Applies the response contract: non-2xx becomes [`ApiError::Status`],
    /// 204 or an empty body becomes an empty JSON object, anything else is
    /// parsed as JSON.
    async fn handle_response(
        endpoint: &str,
        response: Response,
    ) -> Result<serde_json::Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::debug!(endpoint, status = status.as_u16(), %message, "api error response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }
}

/// Message for a failed response: the JSON `detail` field when present,
/// otherwise `HTTP error! status: <code>`.
fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => {
            format!("HTTP error! status: {}", status.as_u16())
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
