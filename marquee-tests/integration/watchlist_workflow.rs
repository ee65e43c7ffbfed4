//! Watchlist flows through the view controller.

use marquee_views::{NotificationKind, ViewPhase, WatchlistView};

use crate::support::{demo_env, signed_out_env};

#[tokio::test]
async fn test_add_list_remove_round_trip() {
    let (client, _provider, _backend) = demo_env();
    let mut view = WatchlistView::new(client);

    view.add("demo-003").await;
    view.add("demo-001").await;
    view.load().await;

    assert_eq!(view.phase(), ViewPhase::Ready);
    let titles: Vec<&str> = view
        .movies()
        .iter()
        .map(|movie| movie.title.as_str())
        .collect();
    // Insertion order, not catalog order
    assert_eq!(titles, vec!["Parasite", "The Matrix"]);

    view.remove("demo-003").await;
    assert_eq!(view.movies().len(), 1);
    assert_eq!(view.movies()[0].title, "The Matrix");
}

#[tokio::test]
async fn test_adding_missing_movie_surfaces_error() {
    let (client, _provider, _backend) = demo_env();
    let mut view = WatchlistView::new(client);

    view.add("no-such-movie").await;
    let drained = view.notifications().drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].kind, NotificationKind::Error);
}

#[tokio::test]
async fn test_watchlist_requires_session() {
    let (client, _backend) = signed_out_env();
    let mut view = WatchlistView::new(client);

    view.load().await;
    assert_eq!(view.phase(), ViewPhase::Ready);
    assert!(view.movies().is_empty());
    assert!(!view.notifications().is_empty());
}

#[tokio::test]
async fn test_deleting_movie_scrubs_it_from_watchlist() {
    let (client, _provider, _backend) = demo_env();
    let mut view = WatchlistView::new(client.clone());

    view.add("demo-006").await;
    client.delete_movie("demo-006").await.unwrap();

    view.load().await;
    assert!(view.movies().is_empty());
}
