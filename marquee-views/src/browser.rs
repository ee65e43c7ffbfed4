//! Browse-view controller: filters, pagination, and the fetch lifecycle.

use marquee_client::{
    ApiClient, ClientError, Movie, MovieFilters, MovieListing, has_next_page,
};
use marquee_core::config::ListingConfig;

use crate::notify::NotificationQueue;

/// Fetch lifecycle of a listing view.
///
/// Every failure path resolves to `Ready`; a view is never left loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Mounted, nothing fetched yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Showing a (possibly empty) result
    Ready,
}

/// Claim ticket for one in-flight listing fetch.
///
/// Carries the filter snapshot the fetch was issued with and a sequence
/// number. Applying a result whose ticket is no longer the newest is a
/// no-op: the last-issued request wins.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    sequence: u64,
    filters: MovieFilters,
}

impl FetchTicket {
    /// The filter snapshot this fetch was issued with.
    pub fn filters(&self) -> &MovieFilters {
        &self.filters
    }
}

/// Controller for the browse listing.
///
/// Owns the filter state and the fetched page. Filter mutators do not
/// fetch by themselves; `apply_filters`, `reset`, and the page movers do.
#[derive(Debug)]
pub struct MovieBrowser {
    client: ApiClient,
    filters: MovieFilters,
    phase: ViewPhase,
    movies: Vec<Movie>,
    total: u64,
    sequence: u64,
    notifications: NotificationQueue,
}

impl MovieBrowser {
    /// Creates a browser in the `Idle` phase with default filters.
    pub fn new(client: ApiClient, listing: &ListingConfig) -> Self {
        Self {
            client,
            filters: MovieFilters::new(listing.page_size),
            phase: ViewPhase::Idle,
            movies: Vec::new(),
            total: 0,
            sequence: 0,
            notifications: NotificationQueue::new(),
        }
    }

    /// Current fetch phase.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Movies on the current page.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Total matches across all pages, as last reported by the backend.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Current filter state.
    pub fn filters(&self) -> &MovieFilters {
        &self.filters
    }

    /// Current page number.
    pub fn page(&self) -> u32 {
        self.filters.page
    }

    /// Whether a page exists after the current one.
    pub fn has_next_page(&self) -> bool {
        has_next_page(self.filters.page, self.filters.page_size(), self.total)
    }

    /// Pending notifications, for the frontend to drain.
    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Sets the free-text search.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
    }

    /// Toggles a genre chip.
    pub fn toggle_genre(&mut self, genre: &str) {
        self.filters.toggle_genre(genre);
    }

    /// Sets the rating bounds; `None` clears a bound.
    pub fn set_rating_bounds(&mut self, min: Option<f32>, max: Option<f32>) {
        self.filters.min_rating = min;
        self.filters.max_rating = max;
    }

    /// Sets the year bounds; `None` clears a bound.
    pub fn set_year_bounds(&mut self, from: Option<i32>, to: Option<i32>) {
        self.filters.year_from = from;
        self.filters.year_to = to;
    }

    /// Applies the current filters from page 1.
    pub async fn apply_filters(&mut self) {
        self.filters.page = 1;
        self.refresh().await;
    }

    /// Restores default filters and performs exactly one fetch at page 1.
    pub async fn reset(&mut self) {
        self.filters.reset();
        self.refresh().await;
    }

    /// Moves to the next page when one exists. Returns whether it moved.
    pub async fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.filters.page += 1;
        self.refresh().await;
        true
    }

    /// Moves to the previous page. Returns whether it moved.
    pub async fn prev_page(&mut self) -> bool {
        if self.filters.page <= 1 {
            return false;
        }
        self.filters.page -= 1;
        self.refresh().await;
        true
    }

    /// Claims the next fetch; any earlier in-flight fetch becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.sequence += 1;
        self.phase = ViewPhase::Loading;
        FetchTicket {
            sequence: self.sequence,
            filters: self.filters.clone(),
        }
    }

    /// Applies a finished fetch.
    ///
    /// A stale ticket is discarded without touching state. Failures resolve
    /// to `Ready` with an empty page and a surfaced notification; the
    /// filter state is preserved so the user can retry.
    pub fn apply_result(
        &mut self,
        ticket: FetchTicket,
        result: Result<MovieListing, ClientError>,
    ) {
        if ticket.sequence != self.sequence {
            tracing::debug!(
                stale = ticket.sequence,
                current = self.sequence,
                "discarding superseded listing response"
            );
            return;
        }

        self.phase = ViewPhase::Ready;
        match result {
            Ok(listing) => {
                self.movies = listing.items;
                self.total = listing.total;
            }
            Err(error) => {
                tracing::warn!(%error, "listing fetch failed");
                self.movies.clear();
                self.total = 0;
                self.notifications.error(error.user_message());
            }
        }
    }

    /// Drives one fetch to completion.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.client.list_movies(ticket.filters()).await;
        self.apply_result(ticket, result);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{Reply, ScriptedBackend, listing_body, signed_out_client};

    fn browser(backend: std::sync::Arc<ScriptedBackend>) -> MovieBrowser {
        MovieBrowser::new(signed_out_client(backend), &ListingConfig::default())
    }

    #[tokio::test]
    async fn test_initial_refresh_reaches_ready() {
        let backend = ScriptedBackend::new();
        backend.push(Reply::Respond(200, listing_body(3, 15)));
        let mut browser = browser(backend);

        assert_eq!(browser.phase(), ViewPhase::Idle);
        browser.refresh().await;

        assert_eq!(browser.phase(), ViewPhase::Ready);
        assert_eq!(browser.movies().len(), 3);
        assert_eq!(browser.total(), 15);
        assert!(browser.has_next_page());
    }

    #[tokio::test]
    async fn test_fetch_failure_resolves_to_ready_with_notification() {
        let backend = ScriptedBackend::new();
        backend.push(Reply::NetworkFail);
        let mut browser = browser(backend);
        browser.set_query("dark");

        browser.refresh().await;

        assert_eq!(browser.phase(), ViewPhase::Ready);
        assert!(browser.movies().is_empty());
        assert_eq!(browser.total(), 0);
        let drained = browser.notifications().drain();
        assert_eq!(drained.len(), 1);
        // Filter state survives the failure for a retry
        assert_eq!(browser.filters().query, "dark");
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_with_exactly_one_fetch() {
        let backend = ScriptedBackend::new();
        backend.push(Reply::Respond(200, listing_body(1, 40)));
        let mut browser = browser(backend.clone());

        browser.set_query("dark");
        browser.toggle_genre("Horror");
        browser.set_rating_bounds(Some(7.0), None);
        browser.apply_filters().await;
        browser.next_page().await;
        assert_eq!(backend.request_count(), 2);

        browser.reset().await;

        assert_eq!(backend.request_count(), 3);
        assert_eq!(browser.page(), 1);
        assert!(browser.filters().query.is_empty());
        assert!(browser.filters().genres.is_empty());
        assert!(browser.filters().min_rating.is_none());

        // The reset fetch went out with the default parameter set
        let request = backend.last_request().unwrap();
        assert!(request.query.iter().all(|(key, _)| {
            matches!(*key, "page" | "limit" | "sortBy" | "sortOrder")
        }));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let backend = ScriptedBackend::new();
        let mut browser = browser(backend);

        let old_ticket = browser.begin_fetch();
        let new_ticket = browser.begin_fetch();

        // Newest fetch lands first
        browser.apply_result(
            new_ticket,
            Ok(serde_json::from_value(listing_body(2, 2)).unwrap()),
        );
        assert_eq!(browser.movies().len(), 2);

        // The superseded response must not overwrite it
        browser.apply_result(
            old_ticket,
            Ok(serde_json::from_value(listing_body(5, 50)).unwrap()),
        );
        assert_eq!(browser.movies().len(), 2);
        assert_eq!(browser.total(), 2);
        assert_eq!(browser.phase(), ViewPhase::Ready);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_clear_newer_result() {
        let backend = ScriptedBackend::new();
        let mut browser = browser(backend);

        let old_ticket = browser.begin_fetch();
        let new_ticket = browser.begin_fetch();

        browser.apply_result(
            new_ticket,
            Ok(serde_json::from_value(listing_body(2, 2)).unwrap()),
        );
        browser.apply_result(
            old_ticket,
            Err(ClientError::Network {
                reason: "late failure".to_string(),
            }),
        );

        assert_eq!(browser.movies().len(), 2);
        assert!(browser.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_page_movement_is_guarded() {
        let backend = ScriptedBackend::new();
        backend.push(Reply::Respond(200, listing_body(12, 15)));
        backend.push(Reply::Respond(200, listing_body(3, 15)));
        let mut browser = browser(backend.clone());

        assert!(!browser.prev_page().await);
        // total == 0 so far, nothing to page into
        assert!(!browser.next_page().await);
        assert_eq!(backend.request_count(), 0);

        browser.refresh().await;
        assert!(browser.next_page().await);
        assert_eq!(browser.page(), 2);
        // page 2 of 15 with page size 12 is the last one
        assert!(!browser.has_next_page());
        assert!(!browser.next_page().await);
    }

    #[tokio::test]
    async fn test_empty_result_set_has_no_next_page() {
        let backend = ScriptedBackend::new();
        backend.push(Reply::Respond(200, json!({ "data": [], "total": 0 })));
        let mut browser = browser(backend);

        browser.refresh().await;
        assert_eq!(browser.phase(), ViewPhase::Ready);
        assert!(browser.movies().is_empty());
        assert!(!browser.has_next_page());
    }

    #[tokio::test]
    async fn test_ticket_carries_filter_snapshot() {
        let backend = ScriptedBackend::new();
        let mut browser = browser(backend);
        browser.set_query("alien");

        let ticket = browser.begin_fetch();
        browser.set_query("predator");

        assert_eq!(ticket.filters().query, "alien");
        assert_eq!(browser.filters().query, "predator");
    }
}
