//! A complete user session: sign in, browse, contribute, organize.

use std::sync::Arc;

use marquee_client::{ApiClient, MemoryBackend, MovieDraft};
use marquee_core::config::ListingConfig;
use marquee_core::{FakeIdentityProvider, IdentityProvider, SessionStore};
use marquee_views::{
    CollectionView, DashboardView, MovieBrowser, ViewPhase, WatchlistView,
};

#[tokio::test]
async fn test_full_user_journey() {
    // Wiring, the same shape the CLI uses
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::new(sessions.clone()));
    let backend = Arc::new(MemoryBackend::with_demo_catalog());
    let client = ApiClient::new(backend.clone(), provider.clone(), sessions.clone());

    // Sign in through the provider; the session store notifies subscribers
    let mut session_events = sessions.subscribe();
    let session = provider
        .sign_in("night-owl", Some("Night Owl"), "Cinephile1")
        .unwrap();
    session_events.changed().await.unwrap();
    assert_eq!(session.uid, "night-owl");

    // Browse sci-fi with a rating floor
    let mut listing = ListingConfig::default();
    listing.page_size = 4;
    let mut browser = MovieBrowser::new(client.clone(), &listing);
    browser.toggle_genre("Sci-Fi");
    browser.set_rating_bounds(Some(8.5), None);
    browser.apply_filters().await;

    assert_eq!(browser.phase(), ViewPhase::Ready);
    assert_eq!(browser.total(), 3);
    assert!(!browser.has_next_page());

    // Contribute a movie
    let mut draft = MovieDraft::new("Blade Runner 2049");
    draft.genre = Some("Sci-Fi".to_string());
    draft.release_year = Some(2017);
    draft.rating = Some(8.0);
    draft.poster_url = Some("https://posters.example.com/br2049.jpg".to_string());
    let added = client.create_movie(&draft).await.unwrap();
    assert!(added.owned_by("night-owl"));

    // It shows up when the browser re-applies the same filters
    browser.set_rating_bounds(Some(7.5), None);
    browser.apply_filters().await;
    assert_eq!(browser.total(), 4);

    // And in the contributor's collection
    let mut collection = CollectionView::new(client.clone());
    collection.load().await;
    assert_eq!(collection.movies().len(), 1);
    assert_eq!(collection.movies()[0].title, "Blade Runner 2049");

    // Save a favorite to the watchlist
    let mut watchlist = WatchlistView::new(client.clone());
    watchlist.add(&added.id).await;
    watchlist.add("demo-002").await;
    watchlist.load().await;
    assert_eq!(watchlist.movies().len(), 2);

    // Dashboard reflects the contribution
    let mut dashboard = DashboardView::new(client.clone());
    dashboard.load().await;
    assert_eq!(dashboard.stats().total_movies, 9);
    assert_eq!(dashboard.my_collection_count(), 1);

    // Removing the movie also scrubs the watchlist
    collection.delete(&added.id).await;
    assert!(collection.movies().is_empty());
    watchlist.load().await;
    assert_eq!(watchlist.movies().len(), 1);
    assert_eq!(watchlist.movies()[0].title, "Inception");

    // Sign out ends the session for every consumer
    provider.sign_out();
    session_events.changed().await.unwrap();
    assert!(!sessions.is_authenticated());

    let mut after_signout = CollectionView::new(client);
    after_signout.load().await;
    assert_eq!(after_signout.phase(), ViewPhase::Ready);
    assert!(after_signout.movies().is_empty());
    assert!(!after_signout.notifications().is_empty());
}

#[tokio::test]
async fn test_stale_session_recovery_journey() {
    let sessions = SessionStore::new();
    let provider = Arc::new(FakeIdentityProvider::new(sessions.clone()));
    let backend = Arc::new(MemoryBackend::with_demo_catalog());
    let client = ApiClient::new(backend.clone(), provider.clone(), sessions);

    provider
        .sign_in("demo-user-0001", Some("Demo User"), "Abcdef")
        .unwrap();

    // The cached token goes stale server-side mid-session
    let stale = provider.fetch_token(false).await.unwrap();
    backend.revoke_token(stale.as_str());

    // The next protected call transparently recovers
    let mut collection = CollectionView::new(client);
    collection.load().await;
    assert_eq!(collection.phase(), ViewPhase::Ready);
    assert_eq!(collection.movies().len(), 3);
    assert!(collection.notifications().is_empty());
}
