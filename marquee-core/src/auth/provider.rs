//! Identity provider boundary.

use async_trait::async_trait;

use super::AuthError;
use super::session::{BearerToken, Session};

/// Trait for identity providers.
///
/// Implementations expose the current session, if any, and mint short-lived
/// bearer tokens for it. The provider's internals (token caching, network
/// round-trips) stay behind this boundary so the request pipeline and its
/// tests can inject a fake.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Returns a snapshot of the current session, if one is active.
    fn session(&self) -> Option<Session>;

    /// Fetches a bearer token for the current session.
    ///
    /// `force_refresh` bypasses any token the provider has cached; callers
    /// use it after the backend rejected the cached token with a 401.
    ///
    /// # Errors
    /// - `AuthError::NotAuthenticated` - No session is active
    /// - `AuthError::TokenFetchFailed` - The provider could not mint a token
    async fn fetch_token(&self, force_refresh: bool) -> Result<BearerToken, AuthError>;
}
