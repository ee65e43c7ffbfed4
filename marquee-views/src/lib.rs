//! Marquee Views - View-model layer for Marquee frontends
//!
//! Controllers own per-view state and drive fetches through the client:
//! the browse listing with its Idle/Loading/Ready lifecycle and
//! last-request-wins supersession of in-flight fetches, the authenticated
//! collection and watchlist views, and the dashboard/home aggregations
//! with per-section failure tolerance.

pub mod browser;
pub mod collection;
pub mod dashboard;
pub mod notify;
pub mod watchlist;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use browser::{FetchTicket, MovieBrowser, ViewPhase};
pub use collection::CollectionView;
pub use dashboard::{DashboardView, HomeView};
pub use notify::{Notification, NotificationKind, NotificationQueue};
pub use watchlist::WatchlistView;
