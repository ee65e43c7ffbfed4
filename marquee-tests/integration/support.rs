//! Shared setup for integration tests.

use std::sync::Arc;

use marquee_client::{ApiClient, MemoryBackend};
use marquee_core::{FakeIdentityProvider, Session, SessionStore};

/// Uid the demo catalog attributes three movies to.
pub const DEMO_UID: &str = "demo-user-0001";

/// Client over the demo catalog with an active session for `DEMO_UID`.
pub fn demo_env() -> (ApiClient, Arc<FakeIdentityProvider>, Arc<MemoryBackend>) {
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::signed_in(
        sessions.clone(),
        Session::with_profile(DEMO_UID, Some("Demo User".to_string()), None),
    ));
    let backend = Arc::new(MemoryBackend::with_demo_catalog());
    let client = ApiClient::new(backend.clone(), provider.clone(), sessions);
    (client, provider, backend)
}

/// Client over the demo catalog with no session.
pub fn signed_out_env() -> (ApiClient, Arc<MemoryBackend>) {
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::new(sessions.clone()));
    let backend = Arc::new(MemoryBackend::with_demo_catalog());
    let client = ApiClient::new(backend.clone(), provider, sessions);
    (client, backend)
}
