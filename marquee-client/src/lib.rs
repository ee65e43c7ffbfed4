//! Marquee Client - Typed access to the movie catalog API
//!
//! Provides the authenticated request pipeline (bearer attachment with
//! graceful degradation, single forced-refresh retry on 401), the listing
//! query builder, client-side form validation, and typed wrappers for every
//! backend endpoint. Transports are pluggable: HTTP for production, an
//! in-memory catalog for tests and demo mode.

pub mod backend;
pub mod client;
pub mod draft;
pub mod errors;
pub mod query;
pub mod types;
pub mod validation;

// Re-export main types
pub use backend::{ApiBackend, ApiRequest, ApiResponse, HttpBackend, MemoryBackend, Method};
pub use client::ApiClient;
pub use draft::MovieDraft;
pub use errors::ClientError;
pub use query::{MovieFilters, has_next_page};
pub use types::{CatalogStats, DistributionSlice, Movie, MovieListing, Watchlist};
pub use validation::ValidationError;

/// Convenience type alias for Results with ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;
