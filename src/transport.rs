//! Authenticated HTTP transport for the SmartShopr API.
//!
//! The [`Transport`] trait is the seam between the typed facade and the
//! network. [`HttpTransport`] is the reqwest implementation: it attaches the
//! bearer token, bounds every call by a timeout and maps status codes onto
//! [`ApiError`]. It never retries.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

pub use reqwest::Method;

use crate::constants::{ERROR_TIMEOUT, ERROR_UNKNOWN, REQUEST_TIMEOUT_SECS};
use crate::error::ApiError;

/// Issues one request against an endpoint relative to the API base URL and
/// returns the decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value, ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// reqwest-backed transport carrying a fixed bearer credential.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with the default 10 second timeout.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ApiError::api("Invalid API key format"))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::api(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, endpoint: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!("{method} {url}");

        let builder = match method {
            Method::GET => self.client.get(&url),
            Method::DELETE => self.client.delete(&url),
            Method::POST => self.client.post(&url),
            Method::PATCH => self.client.patch(&url),
            _ => return Err(ApiError::api(format!("Unknown method: {method}"))),
        };
        let builder = match body {
            Some(body) if method == Method::POST || method == Method::PATCH => builder.json(&body),
            _ => builder,
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth);
        }
        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::AccessDenied);
        }

        let text = response.text().await.map_err(transport_error)?;
        debug!("API response ({status}): {text}");

        if status.as_u16() >= 400 {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| ERROR_UNKNOWN.to_string());
            return Err(ApiError::Api { message });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::api(format!("Invalid response: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::api(ERROR_TIMEOUT)
    } else {
        ApiError::api(format!("Connection error: {err}"))
    }
}
