//! Dashboard and home-page aggregation against the demo catalog.

use marquee_core::config::ListingConfig;
use marquee_views::{DashboardView, HomeView, ViewPhase};

use crate::support::{demo_env, signed_out_env};

#[tokio::test]
async fn test_dashboard_reflects_catalog_and_session() {
    let (client, _provider, _backend) = demo_env();
    let mut view = DashboardView::new(client);

    view.load().await;
    assert_eq!(view.phase(), ViewPhase::Ready);
    assert_eq!(view.stats().total_movies, 8);
    assert_eq!(view.stats().total_users, 3);
    assert_eq!(view.my_collection_count(), 3);

    // Sci-Fi dominates the seeded catalog
    assert_eq!(view.stats().genre_distribution[0].name, "Sci-Fi");
    assert_eq!(view.stats().genre_distribution[0].value, 3);
    assert_eq!(view.stats().recent_movies.len(), 5);
}

#[tokio::test]
async fn test_dashboard_signed_out_has_no_collection_count() {
    let (client, _backend) = signed_out_env();
    let mut view = DashboardView::new(client);

    view.load().await;
    assert_eq!(view.stats().total_movies, 8);
    assert_eq!(view.my_collection_count(), 0);
}

#[tokio::test]
async fn test_home_rails_from_demo_catalog() {
    let (client, _backend) = signed_out_env();
    let mut view = HomeView::new(client, &ListingConfig::default());

    view.load().await;
    assert_eq!(view.phase(), ViewPhase::Ready);

    assert_eq!(view.top_rated().len(), 5);
    assert_eq!(view.top_rated()[0].title, "The Godfather");

    assert_eq!(view.recent().len(), 6);
    assert_eq!(view.recent()[0].title, "The Matrix");

    // Featured prefers the recent rail
    assert_eq!(view.featured()[0].title, "The Matrix");
    assert_eq!(view.stats().total_movies, 8);
}
