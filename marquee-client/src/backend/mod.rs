//! Backend transport implementations for the movie catalog API.

use async_trait::async_trait;
use marquee_core::BearerToken;
use serde_json::Value;

use crate::errors::ClientError;

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// HTTP method of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Canonical method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Description of one outgoing API call.
///
/// The pipeline fills in `bearer` just before dispatch; endpoint wrappers
/// never set it themselves.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL, e.g. `/movies`
    pub path: String,
    /// Query parameters, in send order
    pub query: Vec<(&'static str, String)>,
    /// JSON body, when the method carries one
    pub body: Option<Value>,
    /// Credential attached by the pipeline, if any
    pub bearer: Option<BearerToken>,
}

impl ApiRequest {
    /// Creates a request with no query, body, or credential.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches query parameters.
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response from a backend: status code plus decoded JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded body; `Null` when the backend sent nothing
    pub body: Value,
}

impl ApiResponse {
    /// Builds a response from a status and body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for backend transports.
///
/// Implementations execute one described request against the movie catalog
/// (over HTTP, or in memory for tests and demo mode). A transport never
/// interprets the response beyond decoding its JSON body; status handling
/// belongs to the client pipeline.
#[async_trait]
pub trait ApiBackend: Send + Sync + std::fmt::Debug {
    /// Executes the request and returns the raw status and body.
    ///
    /// # Errors
    /// - `ClientError::Network` - Transport-level failure
    /// - `ClientError::Decode` - Response body was not valid JSON
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::get("/movies")
            .with_query(vec![("page", "1".to_string())]);
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/movies");
        assert_eq!(request.query.len(), 1);
        assert!(request.body.is_none());
        assert!(request.bearer.is_none());
    }

    #[test]
    fn test_response_success_range() {
        assert!(ApiResponse::new(200, Value::Null).is_success());
        assert!(ApiResponse::new(204, Value::Null).is_success());
        assert!(!ApiResponse::new(301, Value::Null).is_success());
        assert!(!ApiResponse::new(401, Value::Null).is_success());
        assert!(!ApiResponse::new(500, Value::Null).is_success());
    }
}
