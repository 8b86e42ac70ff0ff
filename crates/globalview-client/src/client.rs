//! HTTP transport for the `GlobalView` REST API.
//!
//! Wraps `reqwest` with bearer-token handling, cache bypass, and typed JSON
//! decoding. One call per invocation, no retries, no shared response cache.

use std::time::Duration;

use globalview_core::AppConfig;
use reqwest::{header, Client, Method, Url};
use serde::de::DeserializeOwned;

use crate::auth::{LEGACY_TOKEN_COOKIE, TOKEN_COOKIE, TOKEN_ENV_VAR};
use crate::error::ClientError;
use crate::query::QueryParams;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Per-request options for [`GlobalviewClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Fail with [`ClientError::MissingToken`] before sending when no token
    /// is available.
    pub require_auth: bool,
    /// Extra headers, applied after the defaults so they can override them.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            require_auth: true,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            require_auth: false,
            ..Self::default()
        }
    }
}

/// Client for the `GlobalView` REST API.
///
/// Holds the resolved bearer token for one caller. Build a new client per
/// request context; nothing is cached between calls.
pub struct GlobalviewClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GlobalviewClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(&config.api_base_url)?,
            token,
        })
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`GlobalviewClient::new`].
    pub fn with_base_url(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent("globalview/0.1 (dashboard)")
            .build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            token,
        })
    }

    /// The bearer token this client sends, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Performs one HTTP call and decodes the JSON response as `T`.
    ///
    /// Sends `Content-Type: application/json`, `Cache-Control: no-store`, and
    /// `Authorization: Bearer <token>` when a token is held; caller headers
    /// are applied last.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingToken`] if `options.require_auth` is set and no
    ///   token is held. No request is sent.
    /// - [`ClientError::Status`] on a non-2xx response, carrying the raw body.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not decode as `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<T, ClientError> {
        if options.require_auth && self.token.is_none() {
            return Err(ClientError::MissingToken(format!(
                "set the {TOKEN_COOKIE} (or legacy {LEGACY_TOKEN_COOKIE}) cookie, or {TOKEN_ENV_VAR}"
            )));
        }

        tracing::debug!(method = %method, path = url.path(), "globalview request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CACHE_CONTROL, "no-store");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if !options.headers.is_empty() {
            request = request.headers(caller_headers(&options.headers));
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path = url.path(), "globalview request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        // An empty success body decodes as JSON null.
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ClientError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Authenticated GET returning the raw JSON body.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn get_json(
        &self,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.build_url(segments, params)?;
        self.request(Method::GET, url, None, &RequestOptions::default())
            .await
    }

    /// POST with a JSON body, returning the raw JSON response.
    ///
    /// # Errors
    ///
    /// See [`GlobalviewClient::request`].
    pub async fn post_json(
        &self,
        segments: &[&str],
        body: &serde_json::Value,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.build_url(segments, &QueryParams::new())?;
        self.request(Method::POST, url, Some(body), options).await
    }

    /// Appends percent-encoded path segments and the supplied query pairs to
    /// the base URL. No `?` is emitted when `params` is empty.
    pub(crate) fn build_url(
        &self,
        segments: &[&str],
        params: &QueryParams,
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params.iter() {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

/// Converts caller headers into a map that replaces same-named defaults.
/// Names or values that are not valid HTTP headers are dropped.
fn caller_headers(headers: &[(String, String)]) -> header::HeaderMap {
    let mut map = header::HeaderMap::new();
    for (name, value) in headers {
        match (
            header::HeaderName::from_bytes(name.as_bytes()),
            header::HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping invalid request header"),
        }
    }
    map
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("'{raw}': {e}")))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
