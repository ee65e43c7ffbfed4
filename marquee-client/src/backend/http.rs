//! HTTP transport backed by reqwest.

use async_trait::async_trait;
use marquee_core::config::ApiConfig;

use super::{ApiBackend, ApiRequest, ApiResponse, Method};
use crate::errors::ClientError;

/// Production transport that talks to the real backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a transport from API configuration.
    ///
    /// # Errors
    /// - `ClientError::Network` - Invalid base URL or client construction failure
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base = url::Url::parse(&config.base_url).map_err(|e| ClientError::Network {
            reason: format!("invalid API base URL '{}': {e}", config.base_url),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ClientError::Network {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.header(reqwest::header::AUTHORIZATION, token.header_value());
        }

        let response = builder.send().await.map_err(|e| ClientError::Network {
            reason: format!("request to {url} failed: {e}"),
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ClientError::Network {
            reason: format!("reading response body failed: {e}"),
        })?;

        // Empty bodies (204, some DELETEs) decode as null rather than failing
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ClientError::Decode {
                reason: format!("response was not valid JSON: {e}"),
            })?
        };

        Ok(ApiResponse { status, body })
    }
}
