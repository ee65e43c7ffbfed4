//! Client-side validation applied before requests are dispatched.

use thiserror::Error;

/// Earliest release year the catalog accepts.
pub const MIN_RELEASE_YEAR: i32 = 1888;
/// Latest release year the catalog accepts.
pub const MAX_RELEASE_YEAR: i32 = 2100;
/// Lower bound of the rating scale.
pub const MIN_RATING: f32 = 0.0;
/// Upper bound of the rating scale.
pub const MAX_RATING: f32 = 10.0;

/// A payload or filter rejected before dispatch.
///
/// Messages are user-facing; they surface verbatim in notifications.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Movie drafts must carry a non-empty title.
    #[error("Title is required")]
    TitleRequired,

    /// Release year outside the accepted calendar range.
    #[error("Release year must be 1888-2100")]
    ReleaseYearOutOfRange {
        /// The rejected year
        year: i32,
    },

    /// Rating outside the 0-10 scale.
    #[error("Rating must be 0-10")]
    RatingOutOfRange {
        /// The rejected rating
        rating: f32,
    },

    /// Poster URL without an http scheme.
    #[error("Poster URL must start with http:// or https://")]
    InvalidPosterUrl,

    /// Filter rating bounds outside the 0-10 scale.
    #[error("Rating bounds must lie between 0 and 10")]
    RatingBoundsOutOfRange,

    /// Filter year bounds outside plausible calendar years.
    #[error("Year bounds must be plausible calendar years")]
    YearBoundsOutOfRange,

    /// Page numbers start at 1.
    #[error("Page number must be at least 1")]
    PageOutOfRange,
}

/// Whether a year is a plausible calendar year for a film.
pub fn plausible_year(year: i32) -> bool {
    (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year)
}

/// Whether a rating lies on the accepted scale. NaN is rejected.
pub fn valid_rating(rating: f32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Whether a string is an http(s) URL. Scheme match is case-insensitive.
pub fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_year_bounds() {
        assert!(plausible_year(1888));
        assert!(plausible_year(2100));
        assert!(!plausible_year(1887));
        assert!(!plausible_year(2101));
    }

    #[test]
    fn test_valid_rating_rejects_nan() {
        assert!(valid_rating(0.0));
        assert!(valid_rating(10.0));
        assert!(!valid_rating(10.1));
        assert!(!valid_rating(-0.1));
        assert!(!valid_rating(f32::NAN));
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://example.com/poster.jpg"));
        assert!(is_http_url("https://example.com/poster.jpg"));
        assert!(is_http_url("HTTPS://EXAMPLE.COM/POSTER.JPG"));
        assert!(!is_http_url("ftp://example.com/poster.jpg"));
        assert!(!is_http_url("example.com/poster.jpg"));
    }
}
