//! Listing workflow: filters, pagination, and the browse controller
//! against the in-memory catalog.

use std::collections::HashSet;

use proptest::prelude::*;

use marquee_client::{MovieFilters, has_next_page};
use marquee_core::config::ListingConfig;
use marquee_views::{MovieBrowser, ViewPhase};

use crate::support::signed_out_env;

fn small_pages() -> ListingConfig {
    let mut listing = ListingConfig::default();
    listing.page_size = 3;
    listing
}

#[tokio::test]
async fn test_browse_pages_through_the_catalog() {
    let (client, _backend) = signed_out_env();
    let mut browser = MovieBrowser::new(client, &small_pages());

    browser.refresh().await;
    assert_eq!(browser.phase(), ViewPhase::Ready);
    assert_eq!(browser.total(), 8);
    assert_eq!(browser.movies().len(), 3);
    assert!(browser.has_next_page());

    assert!(browser.next_page().await);
    assert!(browser.next_page().await);
    // Page 3 holds the last two movies
    assert_eq!(browser.movies().len(), 2);
    assert!(!browser.has_next_page());
    assert!(!browser.next_page().await);
}

#[tokio::test]
async fn test_genre_and_rating_filters_narrow_results() {
    let (client, _backend) = signed_out_env();
    let mut browser = MovieBrowser::new(client, &small_pages());

    browser.toggle_genre("Sci-Fi");
    browser.set_rating_bounds(Some(8.8), None);
    browser.apply_filters().await;

    assert_eq!(browser.total(), 1);
    assert_eq!(browser.movies()[0].title, "Inception");
}

#[tokio::test]
async fn test_text_search_matches_titles() {
    let (client, _backend) = signed_out_env();
    let mut browser = MovieBrowser::new(client, &small_pages());

    browser.set_query("the");
    browser.apply_filters().await;

    let titles: HashSet<&str> = browser
        .movies()
        .iter()
        .map(|movie| movie.title.as_str())
        .collect();
    assert!(titles.contains("The Matrix"));
    assert!(titles.contains("The Godfather"));
}

#[tokio::test]
async fn test_reset_after_filtering_shows_everything_again() {
    let (client, _backend) = signed_out_env();
    let mut browser = MovieBrowser::new(client, &small_pages());

    browser.set_query("no such movie anywhere");
    browser.apply_filters().await;
    assert_eq!(browser.total(), 0);
    assert!(!browser.has_next_page());

    browser.reset().await;
    assert_eq!(browser.page(), 1);
    assert_eq!(browser.total(), 8);
}

#[tokio::test]
async fn test_year_bounds_filter() {
    let (client, _backend) = signed_out_env();
    let filters = {
        let mut filters = MovieFilters::new(12);
        filters.year_from = Some(2010);
        filters.year_to = Some(2019);
        filters
    };

    let listing = client.list_movies(&filters).await.unwrap();
    let years: Vec<i32> = listing
        .items
        .iter()
        .filter_map(|movie| movie.release_year)
        .collect();
    assert!(!years.is_empty());
    assert!(years.iter().all(|year| (2010..=2019).contains(year)));
}

proptest! {
    // Walking the pages with any page size visits every movie exactly once.
    #[test]
    fn prop_pagination_covers_catalog_without_overlap(page_size in 1u32..10) {
        tokio_test::block_on(async {
            let (client, _backend) = signed_out_env();
            let mut filters = MovieFilters::new(page_size);
            let mut seen = HashSet::new();
            let mut fetched = 0usize;

            loop {
                let listing = client.list_movies(&filters).await.unwrap();
                fetched += listing.items.len();
                for movie in &listing.items {
                    assert!(seen.insert(movie.id.clone()), "duplicate across pages");
                }
                if !has_next_page(filters.page, page_size, listing.total) {
                    break;
                }
                filters.page += 1;
            }

            assert_eq!(fetched, 8);
        });
    }
}
