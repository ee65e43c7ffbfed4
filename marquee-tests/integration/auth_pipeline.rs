//! Authenticated request pipeline against the in-memory backend.

use marquee_client::ClientError;
use marquee_core::{AuthError, FakeIdentityProvider, IdentityProvider, SessionStore};

use crate::support::{demo_env, signed_out_env};

#[tokio::test]
async fn test_authenticated_call_reaches_protected_route() {
    let (client, _provider, _backend) = demo_env();

    let collection = client.my_collection().await.unwrap();
    assert_eq!(collection.len(), 3);
    assert!(collection.iter().all(|m| m.owned_by("demo-user-0001")));
}

#[tokio::test]
async fn test_signed_out_call_is_rejected_without_retry() {
    let (client, _backend) = signed_out_env();

    let result = client.my_collection().await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn test_revoked_token_recovers_via_forced_refresh() {
    let (client, provider, backend) = demo_env();

    // Warm the provider's token cache, then invalidate that token server-side
    let stale = provider.fetch_token(false).await.unwrap();
    backend.revoke_token(stale.as_str());

    // The 401 triggers one forced refresh; the fresh token succeeds
    let collection = client.my_collection().await.unwrap();
    assert_eq!(collection.len(), 3);
    assert_eq!(provider.tokens_minted(), 2);
}

#[tokio::test]
async fn test_backend_rejecting_everything_is_terminal() {
    let (client, provider, backend) = demo_env();
    backend.reject_all_tokens(true);

    let result = client.my_collection().await;
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    // One cached-path mint plus exactly one forced refresh
    assert_eq!(provider.tokens_minted(), 2);
}

#[tokio::test]
async fn test_token_fetch_failure_degrades_then_recovers() {
    let (client, provider, _backend) = demo_env();
    provider.fail_next_fetches(1);

    // First attempt goes out unauthenticated, the backend answers 401,
    // and the forced refresh (now succeeding) recovers the call.
    let collection = client.my_collection().await.unwrap();
    assert_eq!(collection.len(), 3);
    assert_eq!(provider.tokens_minted(), 1);
}

#[tokio::test]
async fn test_public_routes_work_without_credentials() {
    let (client, _backend) = signed_out_env();

    let listing = client
        .list_movies(&marquee_client::MovieFilters::default())
        .await
        .unwrap();
    assert_eq!(listing.total, 8);

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.total_movies, 8);
}

#[tokio::test]
async fn test_sign_in_applies_password_rules() {
    let provider = FakeIdentityProvider::new(SessionStore::new());

    let rejected = provider.sign_in("uid-9", Some("Nova"), "short");
    assert!(matches!(rejected, Err(AuthError::SignInRejected { .. })));

    let session = provider.sign_in("uid-9", Some("Nova"), "Str0ng enough").unwrap();
    assert_eq!(session.uid, "uid-9");
}
