//! Watchlist view controller.

use marquee_client::{ApiClient, Movie};

use crate::browser::ViewPhase;
use crate::notify::NotificationQueue;

/// Controller for the current user's watchlist.
#[derive(Debug)]
pub struct WatchlistView {
    client: ApiClient,
    phase: ViewPhase,
    movies: Vec<Movie>,
    notifications: NotificationQueue,
}

impl WatchlistView {
    /// Creates the view in the `Idle` phase.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            phase: ViewPhase::Idle,
            movies: Vec::new(),
            notifications: NotificationQueue::new(),
        }
    }

    /// Current fetch phase.
    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Saved movies, in the order they were added.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Pending notifications, for the frontend to drain.
    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Loads the watchlist. Failure resolves to `Ready` with no movies
    /// and a surfaced notification.
    pub async fn load(&mut self) {
        self.phase = ViewPhase::Loading;
        match self.client.watchlist().await {
            Ok(watchlist) => self.movies = watchlist.movies,
            Err(error) => {
                tracing::warn!(%error, "watchlist load failed");
                self.movies.clear();
                self.notifications.error("Failed to load your watchlist.");
            }
        }
        self.phase = ViewPhase::Ready;
    }

    /// Saves a movie to the watchlist.
    pub async fn add(&mut self, movie_id: &str) {
        match self.client.add_to_watchlist(movie_id).await {
            Ok(()) => self.notifications.success("Added to watchlist"),
            Err(error) => {
                tracing::warn!(%error, movie = movie_id, "watchlist add failed");
                self.notifications.error(error.user_message());
            }
        }
    }

    /// Removes a movie and reloads on success.
    pub async fn remove(&mut self, movie_id: &str) {
        match self.client.remove_from_watchlist(movie_id).await {
            Ok(()) => {
                self.notifications.success("Removed");
                self.load().await;
            }
            Err(error) => {
                tracing::warn!(%error, movie = movie_id, "watchlist remove failed");
                self.notifications.error(error.user_message());
            }
        }
    }
}
