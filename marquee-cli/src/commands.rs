//! CLI command implementations

use std::sync::Arc;

use clap::Subcommand;

use marquee_client::{ApiBackend, ApiClient, HttpBackend, MemoryBackend, Movie, MovieDraft};
use marquee_core::{FakeIdentityProvider, MarqueeConfig, Session, SessionStore};
use marquee_views::{
    CollectionView, DashboardView, MovieBrowser, NotificationKind, NotificationQueue,
    WatchlistView,
};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Browse the catalog with filters
    Browse {
        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,
        /// Genre filter, repeatable
        #[arg(short, long)]
        genre: Vec<String>,
        /// Minimum rating (0-10)
        #[arg(long)]
        min_rating: Option<f32>,
        /// Maximum rating (0-10)
        #[arg(long)]
        max_rating: Option<f32>,
        /// Earliest release year
        #[arg(long)]
        year_from: Option<i32>,
        /// Latest release year
        #[arg(long)]
        year_to: Option<i32>,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Show a single movie
    Show {
        /// Movie identifier
        id: String,
    },
    /// Add a movie to the catalog
    Add {
        /// Display title
        title: String,
        /// Genre label
        #[arg(long)]
        genre: Option<String>,
        /// Release year
        #[arg(long)]
        year: Option<i32>,
        /// Rating (0-10)
        #[arg(long)]
        rating: Option<f32>,
        /// Director name
        #[arg(long)]
        director: Option<String>,
        /// Poster image URL
        #[arg(long)]
        poster_url: Option<String>,
        /// Plot summary
        #[arg(long)]
        plot: Option<String>,
    },
    /// Update a movie you own
    Update {
        /// Movie identifier
        id: String,
        /// New display title
        title: String,
        /// Genre label
        #[arg(long)]
        genre: Option<String>,
        /// Release year
        #[arg(long)]
        year: Option<i32>,
        /// Rating (0-10)
        #[arg(long)]
        rating: Option<f32>,
    },
    /// Delete a movie you own
    Delete {
        /// Movie identifier
        id: String,
    },
    /// List the movies you added
    Collection,
    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },
    /// Show the highest-rated movies
    TopRated {
        /// How many to show
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show the most recently added movies
    Recent {
        /// How many to show
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show catalog statistics
    Stats,
}

/// Watchlist subcommands
#[derive(Subcommand)]
pub enum WatchlistAction {
    /// Show your watchlist
    List,
    /// Save a movie to your watchlist
    Add {
        /// Movie identifier
        id: String,
    },
    /// Remove a movie from your watchlist
    Remove {
        /// Movie identifier
        id: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands, demo: bool) -> anyhow::Result<()> {
    let config = MarqueeConfig::from_env();
    let client = build_client(&config, demo)?;

    match command {
        Commands::Browse {
            query,
            genre,
            min_rating,
            max_rating,
            year_from,
            year_to,
            page,
        } => {
            browse(
                client, &config, query, genre, min_rating, max_rating, year_from, year_to,
                page,
            )
            .await
        }
        Commands::Show { id } => show_movie(client, &id).await,
        Commands::Add {
            title,
            genre,
            year,
            rating,
            director,
            poster_url,
            plot,
        } => {
            let mut draft = MovieDraft::new(title);
            draft.genre = genre;
            draft.release_year = year;
            draft.rating = rating;
            draft.director = director;
            draft.poster_url = poster_url;
            draft.plot_summary = plot;
            add_movie(client, draft).await
        }
        Commands::Update {
            id,
            title,
            genre,
            year,
            rating,
        } => {
            let mut draft = MovieDraft::new(title);
            draft.genre = genre;
            draft.release_year = year;
            draft.rating = rating;
            update_movie(client, &id, draft).await
        }
        Commands::Delete { id } => delete_movie(client, &id).await,
        Commands::Collection => show_collection(client).await,
        Commands::Watchlist { action } => watchlist(client, action).await,
        Commands::TopRated { limit } => {
            top_rated(client, limit.unwrap_or(config.listing.top_rated_limit)).await
        }
        Commands::Recent { limit } => {
            recent(client, limit.unwrap_or(config.listing.recent_limit)).await
        }
        Commands::Stats => show_stats(client).await,
    }
}

/// Wires the transport and identity provider for the chosen mode.
///
/// Demo mode serves the built-in catalog with an active demo session;
/// otherwise requests go to the configured backend without a session.
fn build_client(config: &MarqueeConfig, demo: bool) -> anyhow::Result<ApiClient> {
    tracing::debug!(demo, base_url = %config.api.base_url, "building client");
    let sessions = SessionStore::new();

    let provider = if demo {
        Arc::new(FakeIdentityProvider::signed_in(
            sessions.clone(),
            Session::with_profile(
                config.auth.demo_uid,
                Some(config.auth.demo_display_name.to_string()),
                None,
            ),
        ))
    } else {
        Arc::new(FakeIdentityProvider::new(sessions.clone()))
    };

    let backend: Arc<dyn ApiBackend> = if demo {
        Arc::new(MemoryBackend::with_demo_catalog())
    } else {
        Arc::new(HttpBackend::new(&config.api)?)
    };

    Ok(ApiClient::new(backend, provider, sessions))
}

fn print_notifications(queue: &mut NotificationQueue) {
    for note in queue.drain() {
        match note.kind {
            NotificationKind::Success => println!("{}", note.message),
            NotificationKind::Error => eprintln!("error: {}", note.message),
        }
    }
}

fn print_movie_row(movie: &Movie) {
    println!("  {:<12} {}  ({})", movie.id, movie.title, movie.summary_line());
}

#[allow(clippy::too_many_arguments)]
async fn browse(
    client: ApiClient,
    config: &MarqueeConfig,
    query: Option<String>,
    genres: Vec<String>,
    min_rating: Option<f32>,
    max_rating: Option<f32>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    page: u32,
) -> anyhow::Result<()> {
    let mut browser = MovieBrowser::new(client, &config.listing);
    if let Some(query) = query {
        browser.set_query(query);
    }
    for genre in &genres {
        browser.toggle_genre(genre);
    }
    browser.set_rating_bounds(min_rating, max_rating);
    browser.set_year_bounds(year_from, year_to);

    browser.apply_filters().await;
    while browser.page() < page {
        if !browser.next_page().await {
            break;
        }
    }
    print_notifications(browser.notifications());

    println!("Movies (page {}, {} total)", browser.page(), browser.total());
    println!("{:-<60}", "");
    if browser.movies().is_empty() {
        println!("No movies matched.");
    } else {
        for movie in browser.movies() {
            print_movie_row(movie);
        }
    }
    if browser.has_next_page() {
        println!();
        println!("More results: rerun with --page {}", browser.page() + 1);
    }

    Ok(())
}

async fn show_movie(client: ApiClient, id: &str) -> anyhow::Result<()> {
    let movie = client.movie(id).await?;

    println!("{}", movie.title);
    println!("{:-<60}", "");
    println!("{}", movie.summary_line());
    if let Some(director) = &movie.director {
        println!("Director: {director}");
    }
    if let Some(cast) = &movie.cast {
        println!("Cast: {cast}");
    }
    if let Some(duration) = movie.duration {
        println!("Duration: {duration} min");
    }
    if let Some(language) = &movie.language {
        println!("Language: {language}");
    }
    if let Some(country) = &movie.country {
        println!("Country: {country}");
    }
    if let Some(plot) = &movie.plot_summary {
        println!();
        println!("{plot}");
    }
    if let Some(poster) = &movie.poster_url {
        println!();
        println!("Poster: {poster}");
    }
    println!(
        "Added by: {}",
        movie.added_by_uid.as_deref().unwrap_or("unknown")
    );

    Ok(())
}

async fn add_movie(client: ApiClient, draft: MovieDraft) -> anyhow::Result<()> {
    match client.create_movie(&draft).await {
        Ok(movie) => {
            println!("Movie added: {} ({})", movie.title, movie.id);
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {}", error.user_message());
            Err(error.into())
        }
    }
}

async fn update_movie(client: ApiClient, id: &str, draft: MovieDraft) -> anyhow::Result<()> {
    match client.update_movie(id, &draft).await {
        Ok(movie) => {
            println!("Movie updated: {} ({})", movie.title, movie.id);
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {}", error.user_message());
            Err(error.into())
        }
    }
}

async fn delete_movie(client: ApiClient, id: &str) -> anyhow::Result<()> {
    match client.delete_movie(id).await {
        Ok(()) => {
            println!("Movie deleted: {id}");
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {}", error.user_message());
            Err(error.into())
        }
    }
}

async fn show_collection(client: ApiClient) -> anyhow::Result<()> {
    let mut view = CollectionView::new(client);
    view.load().await;
    print_notifications(view.notifications());

    println!("My Collection ({} movies)", view.movies().len());
    println!("{:-<60}", "");
    if view.movies().is_empty() {
        println!("You haven't added any movies yet.");
        println!("Use 'marquee add <title>' to add one.");
    } else {
        for movie in view.movies() {
            print_movie_row(movie);
        }
    }

    Ok(())
}

async fn watchlist(client: ApiClient, action: WatchlistAction) -> anyhow::Result<()> {
    let mut view = WatchlistView::new(client);

    match action {
        WatchlistAction::List => {
            view.load().await;
            print_notifications(view.notifications());

            println!("My Watchlist ({} movies)", view.movies().len());
            println!("{:-<60}", "");
            if view.movies().is_empty() {
                println!("Your watchlist is empty.");
            } else {
                for movie in view.movies() {
                    print_movie_row(movie);
                }
            }
        }
        WatchlistAction::Add { id } => {
            view.add(&id).await;
            print_notifications(view.notifications());
        }
        WatchlistAction::Remove { id } => {
            view.remove(&id).await;
            print_notifications(view.notifications());
        }
    }

    Ok(())
}

async fn top_rated(client: ApiClient, limit: u32) -> anyhow::Result<()> {
    let movies = client.top_rated(limit).await?;

    println!("Top Rated");
    println!("{:-<60}", "");
    for movie in &movies {
        print_movie_row(movie);
    }

    Ok(())
}

async fn recent(client: ApiClient, limit: u32) -> anyhow::Result<()> {
    let movies = client.recent(limit).await?;

    println!("Recently Added");
    println!("{:-<60}", "");
    for movie in &movies {
        print_movie_row(movie);
    }

    Ok(())
}

async fn show_stats(client: ApiClient) -> anyhow::Result<()> {
    let session = client.sessions().snapshot();
    let mut view = DashboardView::new(client);
    view.load().await;
    let stats = view.stats();

    if let Some(session) = &session {
        println!("Welcome back, {}!", session.greeting_name());
        println!();
    }
    println!("Catalog Statistics");
    println!("{:-<60}", "");
    println!("Total movies: {}", stats.total_movies);
    println!("Total users: {}", stats.total_users);
    if view.my_collection_count() > 0 {
        println!("My collection: {}", view.my_collection_count());
    }

    if !stats.genre_distribution.is_empty() {
        println!();
        println!("Top genres:");
        for slice in &stats.genre_distribution {
            println!("  {:<12} {}", slice.name, slice.value);
        }
    }

    if !stats.release_year_distribution.is_empty() {
        println!();
        println!("Movies by year:");
        for slice in &stats.release_year_distribution {
            println!("  {:<12} {}", slice.name, slice.value);
        }
    }

    if !stats.recent_movies.is_empty() {
        println!();
        println!("Recently added:");
        for movie in &stats.recent_movies {
            print_movie_row(movie);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_browse_demo_catalog() {
        let result = handle_command(
            Commands::Browse {
                query: None,
                genre: vec!["Sci-Fi".to_string()],
                min_rating: Some(8.0),
                max_rating: None,
                year_from: None,
                year_to: None,
                page: 1,
            },
            true,
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_show_demo_movie() {
        let result = handle_command(
            Commands::Show {
                id: "demo-001".to_string(),
            },
            true,
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_show_missing_movie_fails() {
        let result = handle_command(
            Commands::Show {
                id: "no-such-movie".to_string(),
            },
            true,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft() {
        let result = handle_command(
            Commands::Add {
                title: "   ".to_string(),
                genre: None,
                year: None,
                rating: None,
                director: None,
                poster_url: None,
                plot: None,
            },
            true,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_collection_and_stats_in_demo_mode() {
        assert!(handle_command(Commands::Collection, true).await.is_ok());
        assert!(handle_command(Commands::Stats, true).await.is_ok());
        assert!(
            handle_command(Commands::TopRated { limit: None }, true)
                .await
                .is_ok()
        );
    }
}
