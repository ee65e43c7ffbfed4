//! Authentication and session management.
//!
//! Models the external identity provider behind an injectable trait with a
//! process-wide session store. Consumers read immutable session snapshots
//! and may subscribe to changes; tests and demo mode inject the fake
//! provider instead of a real one.

use thiserror::Error;

pub mod credentials;
pub mod fake;
pub mod provider;
pub mod session;
pub mod store;

pub use credentials::{PasswordRule, validate_password};
pub use fake::FakeIdentityProvider;
pub use provider::IdentityProvider;
pub use session::{BearerToken, Session};
pub use store::SessionStore;

/// Errors from identity and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session is currently active.
    #[error("no active session")]
    NotAuthenticated,

    /// The identity provider failed to mint a token.
    #[error("token fetch failed: {reason}")]
    TokenFetchFailed {
        /// The reason the provider gave, or the transport failure
        reason: String,
    },

    /// The identity provider rejected the supplied credentials.
    #[error("sign-in rejected: {reason}")]
    SignInRejected {
        /// Which account rule the credentials failed
        reason: String,
    },
}
