//! In-memory backend with a seeded demo catalog.
//!
//! Serves the full route table of the movie catalog without a network, for
//! demo mode and integration tests. Auth is enforced the way the real
//! backend enforces it: protected routes answer 401 unless the request
//! carries a valid bearer token, and ownership rules answer 403.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use regex::Regex;
use serde_json::{Value, json};
use uuid::Uuid;

use super::{ApiBackend, ApiRequest, ApiResponse, Method};
use crate::draft::MovieDraft;
use crate::errors::ClientError;
use crate::types::Movie;

/// In-memory stand-in for the movie catalog backend.
///
/// Accepts tokens minted by the fake identity provider
/// (`fake-<uid>-<counter>`); individual tokens can be revoked and the whole
/// backend can be switched to reject every token, which is how tests drive
/// the 401 retry path.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    movies: Vec<Movie>,
    watchlists: HashMap<String, Vec<String>>,
    known_users: HashSet<String>,
    revoked_tokens: HashSet<String>,
    reject_all_tokens: bool,
}

impl MemoryBackend {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with demo movies.
    pub fn with_demo_catalog() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state.lock();
            for movie in demo_movies() {
                if let Some(uid) = &movie.added_by_uid {
                    state.known_users.insert(uid.clone());
                }
                state.movies.push(movie);
            }
        }
        backend
    }

    /// Inserts a movie directly, bypassing auth. Test setup helper.
    pub fn insert_movie(&self, movie: Movie) {
        let mut state = self.state.lock();
        if let Some(uid) = &movie.added_by_uid {
            state.known_users.insert(uid.clone());
        }
        state.movies.push(movie);
    }

    /// Marks a single token as no longer accepted.
    pub fn revoke_token(&self, token: &str) {
        self.state.lock().revoked_tokens.insert(token.to_string());
    }

    /// When set, every token is rejected with 401.
    pub fn reject_all_tokens(&self, reject: bool) {
        self.state.lock().reject_all_tokens = reject;
    }

    /// Number of movies currently stored.
    pub fn movie_count(&self) -> usize {
        self.state.lock().movies.len()
    }
}

/// Uid carried by a valid fake bearer token, if the request has one.
fn bearer_uid(state: &MemoryState, request: &ApiRequest) -> Option<String> {
    let token = request.bearer.as_ref()?;
    let value = token.as_str();
    if state.reject_all_tokens || state.revoked_tokens.contains(value) {
        return None;
    }
    if let Ok(re) = Regex::new(r"^fake-(.+)-\d+$") {
        if let Some(captures) = re.captures(value) {
            return Some(captures[1].to_string());
        }
    }
    None
}

fn param<'a>(request: &'a ApiRequest, name: &str) -> Option<&'a str> {
    request
        .query
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.as_str())
}

fn numeric_param<T: std::str::FromStr>(request: &ApiRequest, name: &str) -> Option<T> {
    param(request, name).and_then(|value| value.parse().ok())
}

fn message_response(status: u16, message: &str) -> ApiResponse {
    ApiResponse::new(status, json!({ "message": message }))
}

fn unauthorized() -> ApiResponse {
    message_response(401, "Missing or invalid credentials")
}

fn movies_json(movies: &[Movie]) -> Result<Value, ClientError> {
    serde_json::to_value(movies).map_err(|e| ClientError::Decode {
        reason: format!("failed to encode movies: {e}"),
    })
}

#[async_trait]
impl ApiBackend for MemoryBackend {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let mut state = self.state.lock();
        let path = request.path.clone();
        let decoded: Vec<String> = path
            .trim_matches('/')
            .split('/')
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(|value| value.into_owned())
                    .unwrap_or_else(|_| segment.to_string())
            })
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        let response = match (request.method, segments.as_slice()) {
            (Method::Get, ["movies"]) => list_movies(&state, &request)?,
            (Method::Get, ["movies", "top-rated"]) => top_rated(&state, &request)?,
            (Method::Get, ["movies", "recent"]) => recent(&state, &request)?,
            (Method::Get, ["movies", "me", "collection"]) => {
                match bearer_uid(&state, &request) {
                    Some(uid) => my_collection(&state, &uid)?,
                    None => unauthorized(),
                }
            }
            (Method::Get, ["movies", id]) => get_movie(&state, id)?,
            (Method::Post, ["movies"]) => match bearer_uid(&state, &request) {
                Some(uid) => create_movie(&mut state, &request, &uid)?,
                None => unauthorized(),
            },
            (Method::Put, ["movies", id]) => match bearer_uid(&state, &request) {
                Some(uid) => update_movie(&mut state, &request, id, &uid)?,
                None => unauthorized(),
            },
            (Method::Delete, ["movies", id]) => match bearer_uid(&state, &request) {
                Some(uid) => delete_movie(&mut state, id, &uid),
                None => unauthorized(),
            },
            (Method::Get, ["watchlist"]) => match bearer_uid(&state, &request) {
                Some(uid) => watchlist(&state, &uid)?,
                None => unauthorized(),
            },
            (Method::Post, ["watchlist", id]) => match bearer_uid(&state, &request) {
                Some(uid) => watchlist_add(&mut state, id, &uid),
                None => unauthorized(),
            },
            (Method::Delete, ["watchlist", id]) => match bearer_uid(&state, &request) {
                Some(uid) => watchlist_remove(&mut state, id, &uid),
                None => unauthorized(),
            },
            (Method::Get, ["stats"]) => stats(&state)?,
            _ => message_response(404, "Unknown route"),
        };

        Ok(response)
    }
}

fn matches_filters(movie: &Movie, request: &ApiRequest) -> bool {
    if let Some(q) = param(request, "q") {
        let needle = q.to_lowercase();
        let title_hit = movie.title.to_lowercase().contains(&needle);
        let plot_hit = movie
            .plot_summary
            .as_ref()
            .is_some_and(|plot| plot.to_lowercase().contains(&needle));
        if !title_hit && !plot_hit {
            return false;
        }
    }

    if let Some(genres) = param(request, "genres") {
        let selected: Vec<&str> = genres.split(',').collect();
        let genre_hit = movie
            .genre
            .as_deref()
            .is_some_and(|genre| selected.contains(&genre));
        if !genre_hit {
            return false;
        }
    }

    if let Some(min_rating) = numeric_param::<f32>(request, "minRating") {
        if !movie.rating.is_some_and(|rating| rating >= min_rating) {
            return false;
        }
    }
    if let Some(max_rating) = numeric_param::<f32>(request, "maxRating") {
        if !movie.rating.is_some_and(|rating| rating <= max_rating) {
            return false;
        }
    }
    if let Some(year_from) = numeric_param::<i32>(request, "yearFrom") {
        if !movie.release_year.is_some_and(|year| year >= year_from) {
            return false;
        }
    }
    if let Some(year_to) = numeric_param::<i32>(request, "yearTo") {
        if !movie.release_year.is_some_and(|year| year <= year_to) {
            return false;
        }
    }

    true
}

fn newest_first(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn list_movies(state: &MemoryState, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
    let mut matching: Vec<&Movie> = state
        .movies
        .iter()
        .filter(|movie| matches_filters(movie, request))
        .collect();
    newest_first(&mut matching);

    let total = matching.len() as u64;
    let page = numeric_param::<u64>(request, "page").unwrap_or(1).max(1);
    let limit = numeric_param::<u64>(request, "limit").unwrap_or(12).max(1);

    let page_items: Vec<Movie> = matching
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    Ok(ApiResponse::new(
        200,
        json!({ "data": movies_json(&page_items)?, "total": total }),
    ))
}

fn top_rated(state: &MemoryState, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
    let limit = numeric_param::<usize>(request, "limit").unwrap_or(5);
    let mut rated: Vec<&Movie> = state
        .movies
        .iter()
        .filter(|movie| movie.rating.is_some())
        .collect();
    rated.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top: Vec<Movie> = rated.into_iter().take(limit).cloned().collect();
    Ok(ApiResponse::new(200, movies_json(&top)?))
}

fn recent(state: &MemoryState, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
    let limit = numeric_param::<usize>(request, "limit").unwrap_or(6);
    let mut all: Vec<&Movie> = state.movies.iter().collect();
    newest_first(&mut all);

    let latest: Vec<Movie> = all.into_iter().take(limit).cloned().collect();
    Ok(ApiResponse::new(200, movies_json(&latest)?))
}

fn get_movie(state: &MemoryState, id: &str) -> Result<ApiResponse, ClientError> {
    match state.movies.iter().find(|movie| movie.id == id) {
        Some(movie) => Ok(ApiResponse::new(
            200,
            serde_json::to_value(movie).map_err(|e| ClientError::Decode {
                reason: format!("failed to encode movie: {e}"),
            })?,
        )),
        None => Ok(message_response(404, "Movie not found")),
    }
}

fn my_collection(state: &MemoryState, uid: &str) -> Result<ApiResponse, ClientError> {
    let mut owned: Vec<&Movie> = state
        .movies
        .iter()
        .filter(|movie| movie.added_by_uid.as_deref() == Some(uid))
        .collect();
    newest_first(&mut owned);

    let collection: Vec<Movie> = owned.into_iter().cloned().collect();
    Ok(ApiResponse::new(200, movies_json(&collection)?))
}

fn create_movie(
    state: &mut MemoryState,
    request: &ApiRequest,
    uid: &str,
) -> Result<ApiResponse, ClientError> {
    let Some(body) = &request.body else {
        return Ok(message_response(400, "Request body is required"));
    };
    let draft: MovieDraft = match serde_json::from_value(body.clone()) {
        Ok(draft) => draft,
        Err(_) => return Ok(message_response(400, "Title is required")),
    };
    if draft.title.trim().is_empty() {
        return Ok(message_response(400, "Title is required"));
    }

    let movie = Movie {
        id: Uuid::new_v4().to_string(),
        title: draft.title.trim().to_string(),
        poster_url: draft.poster_url,
        genre: draft.genre,
        release_year: draft.release_year,
        rating: draft.rating,
        added_by_uid: Some(uid.to_string()),
        director: draft.director,
        cast: draft.cast,
        duration: draft.duration,
        plot_summary: draft.plot_summary,
        language: draft.language,
        country: draft.country,
        created_at: Some(Utc::now()),
    };

    state.known_users.insert(uid.to_string());
    state.movies.push(movie.clone());

    Ok(ApiResponse::new(
        201,
        serde_json::to_value(&movie).map_err(|e| ClientError::Decode {
            reason: format!("failed to encode movie: {e}"),
        })?,
    ))
}

fn update_movie(
    state: &mut MemoryState,
    request: &ApiRequest,
    id: &str,
    uid: &str,
) -> Result<ApiResponse, ClientError> {
    let Some(body) = &request.body else {
        return Ok(message_response(400, "Request body is required"));
    };
    let draft: MovieDraft = match serde_json::from_value(body.clone()) {
        Ok(draft) => draft,
        Err(_) => return Ok(message_response(400, "Title is required")),
    };

    let Some(movie) = state.movies.iter_mut().find(|movie| movie.id == id) else {
        return Ok(message_response(404, "Movie not found"));
    };
    if movie.added_by_uid.as_deref() != Some(uid) {
        return Ok(message_response(403, "Only the owner can edit this movie"));
    }

    movie.title = draft.title.trim().to_string();
    movie.poster_url = draft.poster_url;
    movie.genre = draft.genre;
    movie.release_year = draft.release_year;
    movie.rating = draft.rating;
    movie.director = draft.director;
    movie.cast = draft.cast;
    movie.duration = draft.duration;
    movie.plot_summary = draft.plot_summary;
    movie.language = draft.language;
    movie.country = draft.country;

    let updated = movie.clone();
    Ok(ApiResponse::new(
        200,
        serde_json::to_value(&updated).map_err(|e| ClientError::Decode {
            reason: format!("failed to encode movie: {e}"),
        })?,
    ))
}

fn delete_movie(state: &mut MemoryState, id: &str, uid: &str) -> ApiResponse {
    let Some(position) = state.movies.iter().position(|movie| movie.id == id) else {
        return message_response(404, "Movie not found");
    };
    if state.movies[position].added_by_uid.as_deref() != Some(uid) {
        return message_response(403, "Only the owner can delete this movie");
    }

    state.movies.remove(position);
    for ids in state.watchlists.values_mut() {
        ids.retain(|movie_id| movie_id != id);
    }

    message_response(200, "Movie deleted")
}

fn watchlist(state: &MemoryState, uid: &str) -> Result<ApiResponse, ClientError> {
    let ids = state.watchlists.get(uid).cloned().unwrap_or_default();
    let movies: Vec<Movie> = ids
        .iter()
        .filter_map(|id| state.movies.iter().find(|movie| &movie.id == id))
        .cloned()
        .collect();

    Ok(ApiResponse::new(
        200,
        json!({ "movieIds": movies_json(&movies)? }),
    ))
}

fn watchlist_add(state: &mut MemoryState, id: &str, uid: &str) -> ApiResponse {
    if !state.movies.iter().any(|movie| movie.id == id) {
        return message_response(404, "Movie not found");
    }

    state.known_users.insert(uid.to_string());
    let ids = state.watchlists.entry(uid.to_string()).or_default();
    if !ids.iter().any(|movie_id| movie_id == id) {
        ids.push(id.to_string());
    }

    message_response(200, "Added to watchlist")
}

fn watchlist_remove(state: &mut MemoryState, id: &str, uid: &str) -> ApiResponse {
    if let Some(ids) = state.watchlists.get_mut(uid) {
        ids.retain(|movie_id| movie_id != id);
    }
    message_response(200, "Removed from watchlist")
}

fn stats(state: &MemoryState) -> Result<ApiResponse, ClientError> {
    let mut genre_counts: HashMap<&str, u64> = HashMap::new();
    let mut year_counts: BTreeMap<i32, u64> = BTreeMap::new();
    for movie in &state.movies {
        if let Some(genre) = movie.genre.as_deref() {
            *genre_counts.entry(genre).or_insert(0) += 1;
        }
        if let Some(year) = movie.release_year {
            *year_counts.entry(year).or_insert(0) += 1;
        }
    }

    let mut genre_distribution: Vec<(&str, u64)> = genre_counts.into_iter().collect();
    genre_distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    genre_distribution.truncate(5);
    let genre_distribution: Vec<Value> = genre_distribution
        .into_iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    let release_year_distribution: Vec<Value> = year_counts
        .into_iter()
        .map(|(year, value)| json!({ "name": year.to_string(), "value": value }))
        .collect();

    let mut all: Vec<&Movie> = state.movies.iter().collect();
    newest_first(&mut all);
    let recent_movies: Vec<Movie> = all.into_iter().take(5).cloned().collect();

    Ok(ApiResponse::new(
        200,
        json!({
            "totalMovies": state.movies.len() as u64,
            "totalUsers": state.known_users.len() as u64,
            "genreDistribution": genre_distribution,
            "releaseYearDistribution": release_year_distribution,
            "recentMovies": movies_json(&recent_movies)?,
        }),
    ))
}

fn demo_movie(
    id: &str,
    title: &str,
    genre: &str,
    year: i32,
    rating: f32,
    uid: &str,
    days_ago: i64,
) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        poster_url: Some(format!("https://posters.example.com/{id}.jpg")),
        genre: Some(genre.to_string()),
        release_year: Some(year),
        rating: Some(rating),
        added_by_uid: Some(uid.to_string()),
        director: None,
        cast: None,
        duration: None,
        plot_summary: None,
        language: Some("English".to_string()),
        country: None,
        created_at: Some(Utc::now() - Duration::days(days_ago)),
    }
}

fn demo_movies() -> Vec<Movie> {
    vec![
        demo_movie("demo-001", "The Matrix", "Sci-Fi", 1999, 8.7, "curator-anna", 1),
        demo_movie("demo-002", "Inception", "Sci-Fi", 2010, 8.8, "curator-anna", 2),
        demo_movie("demo-003", "Parasite", "Thriller", 2019, 8.6, "curator-raj", 3),
        demo_movie("demo-004", "Spirited Away", "Animation", 2001, 8.6, "curator-raj", 4),
        demo_movie("demo-005", "The Godfather", "Drama", 1972, 9.2, "demo-user-0001", 5),
        demo_movie("demo-006", "Interstellar", "Sci-Fi", 2014, 8.7, "demo-user-0001", 6),
        demo_movie("demo-007", "Alien", "Horror", 1979, 8.5, "demo-user-0001", 7),
        demo_movie("demo-008", "La La Land", "Romance", 2016, 8.0, "curator-anna", 8),
    ]
}
