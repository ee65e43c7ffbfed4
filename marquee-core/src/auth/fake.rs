//! Fake identity provider for development and testing.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::AuthError;
use super::credentials::validate_password;
use super::provider::IdentityProvider;
use super::session::{BearerToken, Session};
use super::store::SessionStore;

/// Deterministic identity provider for development and testing.
///
/// Mints predictable tokens of the form `fake-<uid>-<counter>`, caches the
/// latest one until a forced refresh, and supports scripted fetch failures
/// so failure paths can be exercised without a real provider.
#[derive(Debug)]
pub struct FakeIdentityProvider {
    sessions: SessionStore,
    state: Mutex<FakeState>,
}

#[derive(Debug, Default)]
struct FakeState {
    minted: u64,
    cached: Option<BearerToken>,
    failures_remaining: u32,
}

impl FakeIdentityProvider {
    /// Creates a signed-out provider backed by the given session store.
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            sessions,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Creates a provider with an already-active session.
    pub fn signed_in(sessions: SessionStore, session: Session) -> Self {
        sessions.sign_in(session);
        Self::new(sessions)
    }

    /// Signs in after applying the account password rules.
    ///
    /// # Errors
    /// - `AuthError::SignInRejected` - Password fails the account rules
    pub fn sign_in(
        &self,
        uid: &str,
        display_name: Option<&str>,
        password: &str,
    ) -> Result<Session, AuthError> {
        let unmet = validate_password(password);
        if !unmet.is_empty() {
            let needs: Vec<String> = unmet.iter().map(ToString::to_string).collect();
            return Err(AuthError::SignInRejected {
                reason: format!("password needs {}", needs.join(", ")),
            });
        }

        let session =
            Session::with_profile(uid, display_name.map(str::to_string), None);
        self.sessions.sign_in(session.clone());
        self.state.lock().cached = None;
        Ok(session)
    }

    /// Clears the session and any cached token.
    pub fn sign_out(&self) {
        self.sessions.sign_out();
        self.state.lock().cached = None;
    }

    /// Scripts the next `count` token fetches to fail.
    pub fn fail_next_fetches(&self, count: u32) {
        self.state.lock().failures_remaining = count;
    }

    /// Number of tokens minted so far (cache hits excluded).
    pub fn tokens_minted(&self) -> u64 {
        self.state.lock().minted
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn session(&self) -> Option<Session> {
        self.sessions.snapshot()
    }

    async fn fetch_token(&self, force_refresh: bool) -> Result<BearerToken, AuthError> {
        let session = self.sessions.snapshot().ok_or(AuthError::NotAuthenticated)?;

        let mut state = self.state.lock();

        // Cache hits never touch the provider, so scripted failures only
        // apply to real fetches.
        if !force_refresh {
            if let Some(cached) = &state.cached {
                return Ok(cached.clone());
            }
        }

        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(AuthError::TokenFetchFailed {
                reason: "scripted fetch failure".to_string(),
            });
        }

        state.minted += 1;
        let token = BearerToken::new(format!("fake-{}-{}", session.uid, state.minted));
        state.cached = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_rejects_weak_password() {
        let provider = FakeIdentityProvider::new(SessionStore::new());
        let result = provider.sign_in("uid-1", Some("Alice"), "abc");
        assert!(matches!(result, Err(AuthError::SignInRejected { .. })));
        assert!(provider.session().is_none());
    }

    #[test]
    fn test_sign_in_activates_session() {
        let store = SessionStore::new();
        let provider = FakeIdentityProvider::new(store.clone());
        let session = provider.sign_in("uid-1", Some("Alice"), "Abcdef").unwrap();

        assert_eq!(session.uid, "uid-1");
        assert_eq!(store.snapshot().unwrap().display_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_fetch_requires_session() {
        let provider = FakeIdentityProvider::new(SessionStore::new());
        let result = provider.fetch_token(false).await;
        assert!(matches!(result, Err(AuthError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_cached_token_until_forced_refresh() {
        let provider =
            FakeIdentityProvider::signed_in(SessionStore::new(), Session::new("uid-1"));

        let first = provider.fetch_token(false).await.unwrap();
        let second = provider.fetch_token(false).await.unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert_eq!(provider.tokens_minted(), 1);

        let forced = provider.fetch_token(true).await.unwrap();
        assert_ne!(forced.as_str(), first.as_str());
        assert_eq!(provider.tokens_minted(), 2);

        // The forced token becomes the new cached one
        let after = provider.fetch_token(false).await.unwrap();
        assert_eq!(after.as_str(), forced.as_str());
    }

    #[tokio::test]
    async fn test_scripted_failures_then_recovery() {
        let provider =
            FakeIdentityProvider::signed_in(SessionStore::new(), Session::new("uid-1"));
        provider.fail_next_fetches(2);

        assert!(provider.fetch_token(false).await.is_err());
        assert!(provider.fetch_token(false).await.is_err());

        let token = provider.fetch_token(false).await.unwrap();
        assert!(token.as_str().starts_with("fake-uid-1-"));
    }

    #[tokio::test]
    async fn test_sign_out_drops_cached_token() {
        let store = SessionStore::new();
        let provider =
            FakeIdentityProvider::signed_in(store.clone(), Session::new("uid-1"));
        provider.fetch_token(false).await.unwrap();

        provider.sign_out();
        assert!(store.snapshot().is_none());
        assert!(matches!(
            provider.fetch_token(false).await,
            Err(AuthError::NotAuthenticated)
        ));
    }
}
