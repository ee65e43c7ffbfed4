//! Wire types for the movie catalog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie record as the backend returns it.
///
/// Only the identifier and title are guaranteed; everything else is
/// optional server-side. Field names on the wire are camelCase with a
/// Mongo-style `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display title
    pub title: String,
    /// URL to poster image
    #[serde(rename = "posterUrl", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Genre label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Release year
    #[serde(rename = "releaseYear", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Rating on the 0-10 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Uid of the user who added this record
    #[serde(rename = "addedByUid", skip_serializing_if = "Option::is_none")]
    pub added_by_uid: Option<String>,
    /// Director name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Main cast, comma separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    /// Runtime in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Plot summary
    #[serde(rename = "plotSummary", skip_serializing_if = "Option::is_none")]
    pub plot_summary: Option<String>,
    /// Original language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Production country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// When the record was added to the catalog
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Whether the given uid owns this record.
    ///
    /// Owners may edit and delete; everyone else gets a read-only view.
    pub fn owned_by(&self, uid: &str) -> bool {
        self.added_by_uid.as_deref() == Some(uid)
    }

    /// One-line summary for list display: genre, year, rating.
    pub fn summary_line(&self) -> String {
        let genre = self.genre.as_deref().unwrap_or("Unknown genre");
        let year = self
            .release_year
            .map_or_else(|| "----".to_string(), |y| y.to_string());
        match self.rating {
            Some(rating) => format!("{genre} | {year} | {rating:.1}/10"),
            None => format!("{genre} | {year} | unrated"),
        }
    }
}

/// One page of the movie listing plus the catalog-wide total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListing {
    /// Movies on this page, most recent first
    #[serde(rename = "data", default)]
    pub items: Vec<Movie>,
    /// Total number of movies matching the filters, across all pages
    #[serde(default)]
    pub total: u64,
}

impl MovieListing {
    /// An empty page with a zero total.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// The caller's watchlist, server-populated with full movie records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    /// Saved movies, in the order they were added
    #[serde(rename = "movieIds", default)]
    pub movies: Vec<Movie>,
}

/// One labeled slice of a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    /// Slice label (genre name, year, ...)
    pub name: String,
    /// Number of movies in the slice
    pub value: u64,
}

/// Aggregate catalog statistics for the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Movies in the catalog
    #[serde(rename = "totalMovies", default)]
    pub total_movies: u64,
    /// Registered users
    #[serde(rename = "totalUsers", default)]
    pub total_users: u64,
    /// Movie counts per genre
    #[serde(rename = "genreDistribution", default)]
    pub genre_distribution: Vec<DistributionSlice>,
    /// Movie counts per release year
    #[serde(rename = "releaseYearDistribution", default)]
    pub release_year_distribution: Vec<DistributionSlice>,
    /// Most recently added movies
    #[serde(rename = "recentMovies", default)]
    pub recent_movies: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_decodes_minimal_record() {
        let movie: Movie = serde_json::from_value(json!({
            "_id": "abc123",
            "title": "The Matrix"
        }))
        .unwrap();

        assert_eq!(movie.id, "abc123");
        assert_eq!(movie.title, "The Matrix");
        assert!(movie.rating.is_none());
        assert!(movie.created_at.is_none());
    }

    #[test]
    fn test_movie_decodes_full_record() {
        let movie: Movie = serde_json::from_value(json!({
            "_id": "abc123",
            "title": "The Matrix",
            "posterUrl": "https://example.com/matrix.jpg",
            "genre": "Sci-Fi",
            "releaseYear": 1999,
            "rating": 8.7,
            "addedByUid": "uid-1",
            "plotSummary": "A hacker discovers reality is a simulation.",
            "createdAt": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(movie.release_year, Some(1999));
        assert_eq!(movie.rating, Some(8.7));
        assert!(movie.owned_by("uid-1"));
        assert!(!movie.owned_by("uid-2"));
    }

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie: Movie = serde_json::from_value(json!({
            "_id": "abc123",
            "title": "Alien",
            "releaseYear": 1979
        }))
        .unwrap();

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["_id"], "abc123");
        assert_eq!(value["releaseYear"], 1979);
        // Unset optionals are omitted, not serialized as null
        assert!(value.get("posterUrl").is_none());
    }

    #[test]
    fn test_listing_tolerates_missing_fields() {
        let listing: MovieListing = serde_json::from_value(json!({})).unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.total, 0);
    }

    #[test]
    fn test_watchlist_tolerates_missing_movie_ids() {
        let watchlist: Watchlist = serde_json::from_value(json!({})).unwrap();
        assert!(watchlist.movies.is_empty());
    }

    #[test]
    fn test_summary_line() {
        let movie: Movie = serde_json::from_value(json!({
            "_id": "1",
            "title": "Parasite",
            "genre": "Thriller",
            "releaseYear": 2019,
            "rating": 8.6
        }))
        .unwrap();
        assert_eq!(movie.summary_line(), "Thriller | 2019 | 8.6/10");

        let bare: Movie =
            serde_json::from_value(json!({"_id": "2", "title": "Unknown"})).unwrap();
        assert_eq!(bare.summary_line(), "Unknown genre | ---- | unrated");
    }

    #[test]
    fn test_stats_default_when_backend_omits_sections() {
        let stats: CatalogStats =
            serde_json::from_value(json!({"totalMovies": 3})).unwrap();
        assert_eq!(stats.total_movies, 3);
        assert_eq!(stats.total_users, 0);
        assert!(stats.genre_distribution.is_empty());
        assert!(stats.recent_movies.is_empty());
    }
}
