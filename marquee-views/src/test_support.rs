//! Shared mocks for view controller tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use marquee_client::{
    ApiBackend, ApiClient, ApiRequest, ApiResponse, ClientError,
};
use marquee_core::{FakeIdentityProvider, Session, SessionStore};

/// One scripted backend reply.
#[derive(Debug)]
pub enum Reply {
    /// Answer with this status and body.
    Respond(u16, Value),
    /// Fail at the transport level.
    NetworkFail,
}

/// Backend that replays scripted replies and counts every request.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().push_back(reply);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl ApiBackend for ScriptedBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Reply::Respond(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::NetworkFail) => Err(ClientError::Network {
                reason: "scripted transport failure".to_string(),
            }),
            None => Ok(ApiResponse::new(200, json!({ "data": [], "total": 0 }))),
        }
    }
}

/// Listing body with `count` generated movies and the given total.
pub fn listing_body(count: usize, total: u64) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| json!({ "_id": format!("m-{i}"), "title": format!("Movie {i}") }))
        .collect();
    json!({ "data": items, "total": total })
}

/// Client over the scripted backend with an active session.
pub fn signed_in_client(backend: Arc<ScriptedBackend>) -> ApiClient {
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::signed_in(
        sessions.clone(),
        Session::new("uid-1"),
    ));
    ApiClient::new(backend, provider, sessions)
}

/// Client over the scripted backend with no session.
pub fn signed_out_client(backend: Arc<ScriptedBackend>) -> ApiClient {
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::new(sessions.clone()));
    ApiClient::new(backend, provider, sessions)
}
