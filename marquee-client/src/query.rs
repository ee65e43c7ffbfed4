//! Listing filter state and query construction.
//!
//! Translates the user-controlled filter/sort/pagination state into the
//! exact parameter set the listing endpoint accepts: empty filters are
//! omitted rather than sent as sentinel values, and the sort order is a
//! fixed most-recent-first constant.

use crate::validation::{ValidationError, plausible_year, valid_rating};

/// Sort field sent with every listing request.
pub const SORT_FIELD: &str = "createdAt";
/// Sort direction sent with every listing request.
pub const SORT_DIRECTION: &str = "desc";
/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// User-controlled filter and pagination state for the browse view.
///
/// Created at view mount, mutated by interaction, reset to defaults on an
/// explicit reset. Owns no external resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFilters {
    /// Free-text search, sent only if non-empty after trimming
    pub query: String,
    /// Selected genre labels, in selection order
    pub genres: Vec<String>,
    /// Minimum rating bound, omitted when unset
    pub min_rating: Option<f32>,
    /// Maximum rating bound, omitted when unset
    pub max_rating: Option<f32>,
    /// Earliest release year, omitted when unset
    pub year_from: Option<i32>,
    /// Latest release year, omitted when unset
    pub year_to: Option<i32>,
    /// Current page, starting at 1
    pub page: u32,
    page_size: u32,
}

impl MovieFilters {
    /// Creates the default filter state for the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            genres: Vec::new(),
            min_rating: None,
            max_rating: None,
            year_from: None,
            year_to: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// The fixed page size for this view.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Toggles a genre: deselects it when present, appends it otherwise.
    ///
    /// Selection order is preserved; the joined parameter reflects the
    /// order the user clicked.
    pub fn toggle_genre(&mut self, genre: &str) {
        if let Some(position) = self.genres.iter().position(|g| g == genre) {
            self.genres.remove(position);
        } else {
            self.genres.push(genre.to_string());
        }
    }

    /// Restores every field to its default, back on page 1.
    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Checks the filter invariants.
    ///
    /// # Errors
    /// - `ValidationError::PageOutOfRange` - Page number below 1
    /// - `ValidationError::RatingBoundsOutOfRange` - Rating bound off the 0-10 scale
    /// - `ValidationError::YearBoundsOutOfRange` - Year bound outside plausible years
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page < 1 {
            return Err(ValidationError::PageOutOfRange);
        }
        for bound in [self.min_rating, self.max_rating].into_iter().flatten() {
            if !valid_rating(bound) {
                return Err(ValidationError::RatingBoundsOutOfRange);
            }
        }
        for bound in [self.year_from, self.year_to].into_iter().flatten() {
            if !plausible_year(bound) {
                return Err(ValidationError::YearBoundsOutOfRange);
            }
        }
        Ok(())
    }

    /// Builds the flat parameter set for the listing endpoint.
    ///
    /// Absent filters are omitted entirely; page, limit, and the fixed
    /// sort constants are always present.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let trimmed = self.query.trim();
        if !trimmed.is_empty() {
            params.push(("q", trimmed.to_string()));
        }
        if !self.genres.is_empty() {
            params.push(("genres", self.genres.join(",")));
        }
        if let Some(min_rating) = self.min_rating {
            params.push(("minRating", min_rating.to_string()));
        }
        if let Some(max_rating) = self.max_rating {
            params.push(("maxRating", max_rating.to_string()));
        }
        if let Some(year_from) = self.year_from {
            params.push(("yearFrom", year_from.to_string()));
        }
        if let Some(year_to) = self.year_to {
            params.push(("yearTo", year_to.to_string()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.page_size.to_string()));
        params.push(("sortBy", SORT_FIELD.to_string()));
        params.push(("sortOrder", SORT_DIRECTION.to_string()));

        params
    }
}

impl Default for MovieFilters {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Whether another page exists after `page` given the server-reported total.
pub fn has_next_page(page: u32, page_size: u32, total: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total
}
