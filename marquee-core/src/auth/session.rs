//! Session and credential types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the authenticated identity.
///
/// A `Session` is what the identity provider reports for the signed-in
/// user. It carries no credential; tokens are fetched on demand per
/// request and never stored alongside the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user identifier, matches `addedByUid` on owned movies
    pub uid: String,
    /// Human-readable name, when the provider knows one
    pub display_name: Option<String>,
    /// Account email, when the provider exposes it
    pub email: Option<String>,
}

impl Session {
    /// Creates a session carrying only a user identifier.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
        }
    }

    /// Creates a session with full profile information.
    pub fn with_profile(
        uid: impl Into<String>,
        display_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            display_name,
            email,
        }
    }

    /// Name suitable for greeting the user, falling back to the uid.
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.uid)
    }
}

/// Short-lived proof of identity attached to outgoing requests.
///
/// Held only for the duration of a single request construction; the
/// identity provider is always asked for a fresh one.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    value: String,
    issued_at: DateTime<Utc>,
}

impl BearerToken {
    /// Wraps an opaque token string minted by an identity provider.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            issued_at: Utc::now(),
        }
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// When the provider minted this token.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Renders the `Authorization` header value for this token.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

// The token value never appears in Debug output; it ends up in logs.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("issued_at", &self.issued_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_name_prefers_display_name() {
        let session =
            Session::with_profile("uid-1", Some("Alice".to_string()), None);
        assert_eq!(session.greeting_name(), "Alice");

        let bare = Session::new("uid-2");
        assert_eq!(bare.greeting_name(), "uid-2");
    }

    #[test]
    fn test_header_value_format() {
        let token = BearerToken::new("abc123");
        assert_eq!(token.header_value(), "Bearer abc123");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_debug_redacts_token_value() {
        let token = BearerToken::new("super-secret");
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
