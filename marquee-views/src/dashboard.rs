//! Dashboard and home-page data controllers.
//!
//! Both views aggregate several endpoints at once and tolerate each
//! failure independently: a missing section degrades to zero/empty while
//! the rest of the page still renders.

use marquee_client::{ApiClient, CatalogStats, Movie};
use marquee_core::config::ListingConfig;

use crate::browser::ViewPhase;

/// Controller for the signed-in dashboard.
#[derive(Debug)]
pub struct DashboardView {
    client: ApiClient,
    phase: ViewPhase,
    stats: CatalogStats,
    my_collection_count: usize,
}

impl DashboardView {
    /// Creates the view in the `Idle` phase.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Idle,
            stats: CatalogStats::default(),
            my_collection_count: 0,
        }
    }

    /// Current fetch phase.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Catalog-wide statistics, zeroed where the fetch failed.
    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    /// Number of movies the current user added.
    pub fn my_collection_count(&self) -> usize {
        self.my_collection_count
    }

    /// Loads global stats and, when a session exists, the caller's
    /// collection count. Each fetch failure is tolerated on its own.
    pub async fn load(&mut self) {
        self.phase = ViewPhase::Loading;

        if self.client.sessions().is_authenticated() {
            let (stats, collection) =
                tokio::join!(self.client.stats(), self.client.my_collection());

            self.stats = stats.unwrap_or_else(|error| {
                tracing::warn!(%error, "dashboard stats fetch failed");
                CatalogStats::default()
            });
            self.my_collection_count = collection
                .map(|movies| movies.len())
                .unwrap_or_else(|error| {
                    tracing::warn!(%error, "collection count fetch failed");
                    0
                });
        } else {
            self.stats = self.client.stats().await.unwrap_or_else(|error| {
                tracing::warn!(%error, "dashboard stats fetch failed");
                CatalogStats::default()
            });
            self.my_collection_count = 0;
        }

        self.phase = ViewPhase::Ready;
    }
}

/// Controller for the public home page rails.
#[derive(Debug)]
pub struct HomeView {
    client: ApiClient,
    phase: ViewPhase,
    top_rated_limit: u32,
    recent_limit: u32,
    stats: CatalogStats,
    top_rated: Vec<Movie>,
    recent: Vec<Movie>,
}

impl HomeView {
    /// Creates the view in the `Idle` phase.
    pub fn new(client: ApiClient, listing: &ListingConfig) -> Self {
        Self {
            client,
            phase: ViewPhase::Idle,
            top_rated_limit: listing.top_rated_limit,
            recent_limit: listing.recent_limit,
            stats: CatalogStats::default(),
            top_rated: Vec::new(),
            recent: Vec::new(),
        }
    }

    /// Current fetch phase.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Headline statistics, zeroed where the fetch failed.
    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    /// Top-rated rail.
    pub fn top_rated(&self) -> &[Movie] {
        &self.top_rated
    }

    /// Recently-added rail.
    pub fn recent(&self) -> &[Movie] {
        &self.recent
    }

    /// Movies for the rotating hero: recent when available, top-rated
    /// otherwise.
    pub fn featured(&self) -> &[Movie] {
        if self.recent.is_empty() {
            &self.top_rated
        } else {
            &self.recent
        }
    }

    /// Loads all three rails concurrently; any individual failure
    /// degrades that section to empty.
    pub async fn load(&mut self) {
        self.phase = ViewPhase::Loading;

        let (stats, top_rated, recent) = tokio::join!(
            self.client.stats(),
            self.client.top_rated(self.top_rated_limit),
            self.client.recent(self.recent_limit),
        );

        self.stats = stats.unwrap_or_else(|error| {
            tracing::warn!(%error, "stats failed");
            CatalogStats::default()
        });
        self.top_rated = top_rated.unwrap_or_else(|error| {
            tracing::warn!(%error, "top rated failed");
            Vec::new()
        });
        self.recent = recent.unwrap_or_else(|error| {
            tracing::warn!(%error, "recent failed");
            Vec::new()
        });

        self.phase = ViewPhase::Ready;
    }
}
