//! Movie create/update/delete flows with ownership enforcement.

use std::sync::Arc;

use marquee_client::{ApiClient, ClientError, MovieDraft, MovieFilters};
use marquee_core::{FakeIdentityProvider, Session, SessionStore};

use crate::support::{DEMO_UID, demo_env};

#[tokio::test]
async fn test_created_movie_appears_in_listing_and_collection() {
    let (client, _provider, backend) = demo_env();

    let mut draft = MovieDraft::new("  Arrival  ");
    draft.genre = Some("Sci-Fi".to_string());
    draft.release_year = Some(2016);
    draft.rating = Some(7.9);

    let movie = client.create_movie(&draft).await.unwrap();
    assert_eq!(movie.title, "Arrival");
    assert!(movie.owned_by(DEMO_UID));
    assert_eq!(backend.movie_count(), 9);

    let listing = client.list_movies(&MovieFilters::default()).await.unwrap();
    assert_eq!(listing.total, 9);
    // Newest record leads the most-recent-first listing
    assert_eq!(listing.items[0].title, "Arrival");

    let collection = client.my_collection().await.unwrap();
    assert_eq!(collection.len(), 4);
}

#[tokio::test]
async fn test_invalid_draft_is_rejected_before_dispatch() {
    let (client, _provider, backend) = demo_env();

    let mut draft = MovieDraft::new("Bad Year");
    draft.release_year = Some(1400);

    let result = client.create_movie(&draft).await;
    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert_eq!(backend.movie_count(), 8);
}

#[tokio::test]
async fn test_owner_can_update_and_delete() {
    let (client, _provider, _backend) = demo_env();

    let mut draft = MovieDraft::new("The Godfather");
    draft.genre = Some("Crime".to_string());
    draft.release_year = Some(1972);
    draft.rating = Some(9.2);

    let updated = client.update_movie("demo-005", &draft).await.unwrap();
    assert_eq!(updated.genre.as_deref(), Some("Crime"));

    client.delete_movie("demo-005").await.unwrap();
    let result = client.movie("demo-005").await;
    assert!(matches!(result, Err(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn test_non_owner_cannot_modify() {
    let (_client, _provider, backend) = demo_env();

    // Someone else's session against the same backend
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::signed_in(
        sessions.clone(),
        Session::new("somebody-else"),
    ));
    let intruder = ApiClient::new(backend.clone(), provider, sessions);

    // demo-005 belongs to the demo user
    let result = intruder
        .update_movie("demo-005", &MovieDraft::new("Hijacked"))
        .await;
    assert!(matches!(result, Err(ClientError::Forbidden { .. })));

    let result = intruder.delete_movie("demo-005").await;
    assert!(matches!(result, Err(ClientError::Forbidden { .. })));
    assert_eq!(backend.movie_count(), 8);
}

#[tokio::test]
async fn test_fetch_single_movie() {
    let (client, _provider, _backend) = demo_env();

    let movie = client.movie("demo-003").await.unwrap();
    assert_eq!(movie.title, "Parasite");
    assert_eq!(movie.release_year, Some(2019));
}
