//! API client with the authenticated request pipeline.
//!
//! Every outbound call flows through [`ApiClient::dispatch`]: when a session
//! is active a fresh bearer token is fetched and attached, a token-fetch
//! failure downgrades the call to unauthenticated instead of aborting it,
//! and a 401 with an active session is retried exactly once after a forced
//! token refresh. The backend stays the authority on rejecting
//! unauthenticated calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use marquee_core::{IdentityProvider, SessionStore};

use crate::backend::{ApiBackend, ApiRequest, ApiResponse};
use crate::draft::MovieDraft;
use crate::errors::ClientError;
use crate::query::MovieFilters;
use crate::types::{CatalogStats, Movie, MovieListing, Watchlist};

/// Client for the movie catalog backend.
///
/// Cheap to clone; all clones share the backend, identity provider, and
/// session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    backend: Arc<dyn ApiBackend>,
    identity: Arc<dyn IdentityProvider>,
    sessions: SessionStore,
}

impl ApiClient {
    /// Creates a client over the given transport and identity provider.
    pub fn new(
        backend: Arc<dyn ApiBackend>,
        identity: Arc<dyn IdentityProvider>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            backend,
            identity,
            sessions,
        }
    }

    /// The session store this client consults before each request.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Runs one request through the authenticated pipeline.
    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let authenticated = self.sessions.is_authenticated();

        let mut first = request.clone();
        if authenticated {
            match self.identity.fetch_token(false).await {
                Ok(token) => first.bearer = Some(token),
                Err(error) => {
                    // Non-fatal: the backend decides what an unauthenticated
                    // call may do.
                    tracing::warn!(
                        %error,
                        path = %request.path,
                        "token fetch failed; dispatching unauthenticated"
                    );
                }
            }
        }

        let response = self.backend.execute(first).await?;
        if response.status != 401 || !authenticated {
            return Ok(response);
        }

        // Stale credential: force a refresh and retry exactly once.
        tracing::debug!(path = %request.path, "401 with active session; forcing token refresh");
        let token = self.identity.fetch_token(true).await.map_err(|error| {
            tracing::warn!(%error, "forced token refresh failed");
            ClientError::Unauthorized
        })?;

        let mut retry = request;
        retry.bearer = Some(token);
        let response = self.backend.execute(retry).await?;
        if response.status == 401 {
            return Err(ClientError::Unauthorized);
        }
        Ok(response)
    }

    fn expect_success(response: ApiResponse) -> Result<Value, ClientError> {
        if response.is_success() {
            return Ok(response.body);
        }
        Err(match response.status {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden {
                reason: Self::error_message(&response.body),
            },
            404 => ClientError::NotFound {
                resource: Self::error_message(&response.body),
            },
            status => ClientError::Api {
                status,
                message: Self::error_message(&response.body),
            },
        })
    }

    /// Pulls a human-readable message out of an error body, whichever of
    /// the backend's shapes it used.
    fn error_message(body: &Value) -> String {
        if let Some(message) = body.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return error.to_string();
        }
        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            let joined: Vec<&str> = errors.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                return joined.join(", ");
            }
        }
        "unexpected backend response".to_string()
    }

    fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ClientError> {
        let body = Self::expect_success(response)?;
        serde_json::from_value(body).map_err(|e| ClientError::Decode {
            reason: format!("unexpected response shape: {e}"),
        })
    }

    /// Fetches one page of the movie listing.
    ///
    /// # Errors
    /// - `ClientError::Validation` - Filter state violates its invariants
    /// - `ClientError::Network` - Transport failure
    /// - `ClientError::Decode` - Unexpected response shape
    pub async fn list_movies(&self, filters: &MovieFilters) -> Result<MovieListing, ClientError> {
        filters.validate()?;
        let request = ApiRequest::get("/movies").with_query(filters.to_query_params());
        Self::decode(self.dispatch(request).await?)
    }

    /// Fetches a single movie by identifier.
    ///
    /// # Errors
    /// - `ClientError::NotFound` - No movie with this identifier
    /// - `ClientError::Network` - Transport failure
    pub async fn movie(&self, id: &str) -> Result<Movie, ClientError> {
        let request = ApiRequest::get(format!("/movies/{}", urlencoding::encode(id)));
        Self::decode(self.dispatch(request).await?)
    }

    /// Creates a movie from a draft, validating it first.
    ///
    /// # Errors
    /// - `ClientError::Validation` - Draft fails the form rules
    /// - `ClientError::Unauthorized` - No valid credential after one forced refresh
    pub async fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, ClientError> {
        let draft = draft.normalized();
        draft.validate()?;
        let body = serde_json::to_value(&draft).map_err(|e| ClientError::Decode {
            reason: format!("failed to encode draft: {e}"),
        })?;
        let request = ApiRequest::post("/movies").with_body(body);
        Self::decode(self.dispatch(request).await?)
    }

    /// Updates a movie from a draft, validating it first.
    ///
    /// # Errors
    /// - `ClientError::Validation` - Draft fails the form rules
    /// - `ClientError::Forbidden` - Caller does not own the movie
    /// - `ClientError::NotFound` - No movie with this identifier
    pub async fn update_movie(&self, id: &str, draft: &MovieDraft) -> Result<Movie, ClientError> {
        let draft = draft.normalized();
        draft.validate()?;
        let body = serde_json::to_value(&draft).map_err(|e| ClientError::Decode {
            reason: format!("failed to encode draft: {e}"),
        })?;
        let request =
            ApiRequest::put(format!("/movies/{}", urlencoding::encode(id))).with_body(body);
        Self::decode(self.dispatch(request).await?)
    }

    /// Deletes a movie by identifier.
    ///
    /// # Errors
    /// - `ClientError::Forbidden` - Caller does not own the movie
    /// - `ClientError::NotFound` - No movie with this identifier
    pub async fn delete_movie(&self, id: &str) -> Result<(), ClientError> {
        let request = ApiRequest::delete(format!("/movies/{}", urlencoding::encode(id)));
        Self::expect_success(self.dispatch(request).await?)?;
        Ok(())
    }

    /// Fetches the movies added by the current user.
    ///
    /// # Errors
    /// - `ClientError::Unauthorized` - No valid credential after one forced refresh
    pub async fn my_collection(&self) -> Result<Vec<Movie>, ClientError> {
        Self::decode(self.dispatch(ApiRequest::get("/movies/me/collection")).await?)
    }

    /// Fetches the highest-rated movies.
    ///
    /// # Errors
    /// - `ClientError::Network` - Transport failure
    pub async fn top_rated(&self, limit: u32) -> Result<Vec<Movie>, ClientError> {
        let request = ApiRequest::get("/movies/top-rated")
            .with_query(vec![("limit", limit.to_string())]);
        Self::decode(self.dispatch(request).await?)
    }

    /// Fetches the most recently added movies.
    ///
    /// # Errors
    /// - `ClientError::Network` - Transport failure
    pub async fn recent(&self, limit: u32) -> Result<Vec<Movie>, ClientError> {
        let request =
            ApiRequest::get("/movies/recent").with_query(vec![("limit", limit.to_string())]);
        Self::decode(self.dispatch(request).await?)
    }

    /// Fetches the current user's watchlist.
    ///
    /// # Errors
    /// - `ClientError::Unauthorized` - No valid credential after one forced refresh
    pub async fn watchlist(&self) -> Result<Watchlist, ClientError> {
        Self::decode(self.dispatch(ApiRequest::get("/watchlist")).await?)
    }

    /// Adds a movie to the current user's watchlist.
    ///
    /// # Errors
    /// - `ClientError::NotFound` - No movie with this identifier
    /// - `ClientError::Unauthorized` - No valid credential after one forced refresh
    pub async fn add_to_watchlist(&self, movie_id: &str) -> Result<(), ClientError> {
        let request =
            ApiRequest::post(format!("/watchlist/{}", urlencoding::encode(movie_id)));
        Self::expect_success(self.dispatch(request).await?)?;
        Ok(())
    }

    /// Removes a movie from the current user's watchlist.
    ///
    /// # Errors
    /// - `ClientError::Unauthorized` - No valid credential after one forced refresh
    pub async fn remove_from_watchlist(&self, movie_id: &str) -> Result<(), ClientError> {
        let request =
            ApiRequest::delete(format!("/watchlist/{}", urlencoding::encode(movie_id)));
        Self::expect_success(self.dispatch(request).await?)?;
        Ok(())
    }

    /// Fetches aggregate catalog statistics.
    ///
    /// # Errors
    /// - `ClientError::Network` - Transport failure
    pub async fn stats(&self) -> Result<CatalogStats, ClientError> {
        Self::decode(self.dispatch(ApiRequest::get("/stats")).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    use marquee_core::{FakeIdentityProvider, Session};

    use super::*;
    use crate::backend::Method;

    /// Backend that replays scripted responses and records every request.
    #[derive(Debug, Default)]
    struct ScriptedBackend {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedBackend {
        fn script(responses: Vec<ApiResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl ApiBackend for ScriptedBackend {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
            self.requests.lock().push(request);
            Ok(self
                .responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| ApiResponse::new(200, json!({}))))
        }
    }

    fn signed_in_client(backend: Arc<ScriptedBackend>) -> (ApiClient, Arc<FakeIdentityProvider>) {
        let sessions = SessionStore::new();
        let provider = Arc::new(FakeIdentityProvider::signed_in(
            sessions.clone(),
            Session::new("uid-1"),
        ));
        let client = ApiClient::new(backend, provider.clone(), sessions);
        (client, provider)
    }

    fn signed_out_client(backend: Arc<ScriptedBackend>) -> ApiClient {
        let sessions = SessionStore::new();
        let provider = Arc::new(FakeIdentityProvider::new(sessions.clone()));
        ApiClient::new(backend, provider, sessions)
    }

    #[tokio::test]
    async fn test_attaches_bearer_when_signed_in() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(
            200,
            json!({ "data": [], "total": 0 }),
        )]);
        let (client, _provider) = signed_in_client(backend.clone());

        client.list_movies(&MovieFilters::default()).await.unwrap();

        let requests = backend.recorded();
        assert_eq!(requests.len(), 1);
        let token = requests[0].bearer.as_ref().unwrap();
        assert!(token.as_str().starts_with("fake-uid-1-"));
    }

    #[tokio::test]
    async fn test_no_bearer_when_signed_out() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(
            200,
            json!({ "data": [], "total": 0 }),
        )]);
        let client = signed_out_client(backend.clone());

        client.list_movies(&MovieFilters::default()).await.unwrap();
        assert!(backend.recorded()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_token_fetch_failure_still_dispatches() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(
            200,
            json!({ "data": [], "total": 0 }),
        )]);
        let (client, provider) = signed_in_client(backend.clone());
        provider.fail_next_fetches(1);

        let listing = client.list_movies(&MovieFilters::default()).await.unwrap();
        assert_eq!(listing.total, 0);

        // Dispatched exactly once, without an Authorization header
        let requests = backend.recorded();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_401_forces_refresh_and_retries_once() {
        let backend = ScriptedBackend::script(vec![
            ApiResponse::new(401, json!({ "message": "token expired" })),
            ApiResponse::new(200, json!([])),
        ]);
        let (client, provider) = signed_in_client(backend.clone());

        let collection = client.my_collection().await.unwrap();
        assert!(collection.is_empty());

        let requests = backend.recorded();
        assert_eq!(requests.len(), 2);
        let first = requests[0].bearer.as_ref().unwrap().as_str().to_string();
        let second = requests[1].bearer.as_ref().unwrap().as_str().to_string();
        assert_ne!(first, second);
        // One cached mint plus one forced mint
        assert_eq!(provider.tokens_minted(), 2);
    }

    #[tokio::test]
    async fn test_second_401_is_terminal() {
        let backend = ScriptedBackend::script(vec![
            ApiResponse::new(401, json!({})),
            ApiResponse::new(401, json!({})),
        ]);
        let (client, _provider) = signed_in_client(backend.clone());

        let result = client.my_collection().await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        // Exactly one retry, never more
        assert_eq!(backend.recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_401_without_session_is_not_retried() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(401, json!({}))]);
        let client = signed_out_client(backend.clone());

        let result = client.my_collection().await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_forced_refresh_is_terminal() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(401, json!({}))]);
        let (client, provider) = signed_in_client(backend.clone());
        // First fetch succeeds (cached), the forced refresh fails
        provider.fetch_token(false).await.unwrap();
        provider.fail_next_fetches(1);

        let result = client.my_collection().await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(backend.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_the_backend() {
        let backend = ScriptedBackend::script(vec![]);
        let (client, _provider) = signed_in_client(backend.clone());

        let result = client.create_movie(&MovieDraft::new("   ")).await;
        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert!(backend.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let backend = ScriptedBackend::script(vec![
            ApiResponse::new(403, json!({ "message": "not yours" })),
            ApiResponse::new(404, json!({ "message": "Movie not found" })),
            ApiResponse::new(500, json!({ "error": "boom" })),
        ]);
        let (client, _provider) = signed_in_client(backend.clone());

        assert!(matches!(
            client.delete_movie("demo-1").await,
            Err(ClientError::Forbidden { .. })
        ));
        assert!(matches!(
            client.movie("demo-1").await,
            Err(ClientError::NotFound { .. })
        ));
        match client.movie("demo-1").await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_message_joins_error_list() {
        let body = json!({ "errors": ["too long", "bad year"] });
        assert_eq!(ApiClient::error_message(&body), "too long, bad year");
        assert_eq!(
            ApiClient::error_message(&json!({})),
            "unexpected backend response"
        );
    }

    #[tokio::test]
    async fn test_paths_encode_identifiers() {
        let backend = ScriptedBackend::script(vec![ApiResponse::new(
            404,
            json!({ "message": "Movie not found" }),
        )]);
        let (client, _provider) = signed_in_client(backend.clone());

        let _ = client.movie("weird id/../x").await;
        let requests = backend.recorded();
        assert_eq!(requests[0].method, Method::Get);
        assert!(!requests[0].path.contains(' '));
        assert!(!requests[0].path.contains("../"));
    }
}
