//! Movie create/update payloads and their validation.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, is_http_url, plausible_year, valid_rating};

/// Payload for creating or updating a movie.
///
/// Mirrors the add/update form: free-text fields are trimmed and empty
/// entries are omitted from the serialized body rather than sent as empty
/// strings. Call [`MovieDraft::normalized`] then [`MovieDraft::validate`]
/// before dispatch; the client does both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    /// Display title, required
    pub title: String,
    /// Genre label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Release year
    #[serde(rename = "releaseYear", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    /// Director name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Main cast, comma separated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    /// Rating on the 0-10 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Runtime in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Plot summary
    #[serde(rename = "plotSummary", skip_serializing_if = "Option::is_none")]
    pub plot_summary: Option<String>,
    /// URL to poster image
    #[serde(rename = "posterUrl", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Original language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Production country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl MovieDraft {
    /// Creates a draft carrying only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with every text field trimmed and empties dropped.
    pub fn normalized(&self) -> Self {
        let mut draft = self.clone();
        draft.title = draft.title.trim().to_string();
        for field in [
            &mut draft.genre,
            &mut draft.director,
            &mut draft.cast,
            &mut draft.plot_summary,
            &mut draft.poster_url,
            &mut draft.language,
            &mut draft.country,
        ] {
            *field = field
                .take()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
        }
        draft
    }

    /// Checks the form rules, assuming a normalized draft.
    ///
    /// # Errors
    /// - `ValidationError::TitleRequired` - Empty title
    /// - `ValidationError::ReleaseYearOutOfRange` - Year outside 1888-2100
    /// - `ValidationError::RatingOutOfRange` - Rating off the 0-10 scale
    /// - `ValidationError::InvalidPosterUrl` - Poster URL without http scheme
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if let Some(year) = self.release_year {
            if !plausible_year(year) {
                return Err(ValidationError::ReleaseYearOutOfRange { year });
            }
        }
        if let Some(rating) = self.rating {
            if !valid_rating(rating) {
                return Err(ValidationError::RatingOutOfRange { rating });
            }
        }
        if let Some(poster_url) = &self.poster_url {
            if !poster_url.trim().is_empty() && !is_http_url(poster_url.trim()) {
                return Err(ValidationError::InvalidPosterUrl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_drops_empties() {
        let mut draft = MovieDraft::new("  The Matrix  ");
        draft.genre = Some("  Sci-Fi ".to_string());
        draft.director = Some("   ".to_string());
        draft.country = None;

        let normalized = draft.normalized();
        assert_eq!(normalized.title, "The Matrix");
        assert_eq!(normalized.genre.as_deref(), Some("Sci-Fi"));
        assert!(normalized.director.is_none());
        assert!(normalized.country.is_none());
    }

    #[test]
    fn test_empty_title_rejected() {
        let draft = MovieDraft::new("   ").normalized();
        assert_eq!(draft.validate(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn test_release_year_bounds() {
        let mut draft = MovieDraft::new("Old One");
        draft.release_year = Some(1600);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::ReleaseYearOutOfRange { year: 1600 })
        );

        draft.release_year = Some(1927);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_rating_bounds() {
        let mut draft = MovieDraft::new("Overrated");
        draft.rating = Some(11.0);
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::RatingOutOfRange { .. })
        ));

        draft.rating = Some(9.3);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_poster_url_scheme() {
        let mut draft = MovieDraft::new("Poster Test");
        draft.poster_url = Some("ftp://example.com/poster.jpg".to_string());
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPosterUrl));

        draft.poster_url = Some("https://example.com/poster.jpg".to_string());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let mut draft = MovieDraft::new("Minimal");
        draft.release_year = Some(2020);

        let value = serde_json::to_value(draft.normalized()).unwrap();
        assert_eq!(value["title"], "Minimal");
        assert_eq!(value["releaseYear"], 2020);
        assert!(value.get("genre").is_none());
        assert!(value.get("posterUrl").is_none());
    }
}
