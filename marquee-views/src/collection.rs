//! My-collection view controller.

use marquee_client::{ApiClient, Movie};

use crate::browser::ViewPhase;
use crate::notify::NotificationQueue;

/// Controller for the movies the current user added.
///
/// Requires a session; the client pipeline already handles the
/// forced-refresh retry when the backend answers 401.
#[derive(Debug)]
pub struct CollectionView {
    client: ApiClient,
    phase: ViewPhase,
    movies: Vec<Movie>,
    notifications: NotificationQueue,
}

impl CollectionView {
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

    /// The user's movies, most recent first.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Pending notifications, for the frontend to drain.
    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Loads the collection. Failure resolves to `Ready` with no movies
    /// and a surfaced notification.
    pub async fn load(&mut self) {
        self.phase = ViewPhase::Loading;
        match self.client.my_collection().await {
            Ok(movies) => self.movies = movies,
            Err(error) => {
                tracing::warn!(%error, "collection load failed");
                self.movies.clear();
                self.notifications.error("Failed to load your collection.");
            }
        }
        self.phase = ViewPhase::Ready;
    }

    /// Deletes an owned movie and reloads on success.
    pub async fn delete(&mut self, id: &str) {
        match self.client.delete_movie(id).await {
            Ok(()) => {
                self.notifications.success("Deleted");
                self.load().await;
            }
            Err(error) => {
                tracing::warn!(%error, movie = id, "delete failed");
                self.notifications.error("Delete failed.");
            }
        }
    }
}
