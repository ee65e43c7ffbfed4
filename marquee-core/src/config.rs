//! Centralized configuration for Marquee.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
}

/// Backend API endpoint configuration.
///
/// Controls where outgoing requests go and how long they may take.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the movie catalog backend
    pub base_url: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5050/api".to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: "marquee/0.1.0",
        }
    }
}

/// Identity and session configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of tokens minted by the fake identity provider
    pub token_ttl: Duration,
    /// Identity used by demo-mode sign-in
    pub demo_uid: &'static str,
    /// Display name used by demo-mode sign-in
    pub demo_display_name: &'static str,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600), // 1 hour
            demo_uid: "demo-user-0001",
            demo_display_name: "Demo User",
        }
    }
}

/// Listing view configuration.
///
/// Page size and sort order are fixed for the browse view; the home rails
/// have their own item limits.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Fixed page size for the browse listing
    pub page_size: u32,
    /// Sort field sent with every listing request
    pub sort_field: &'static str,
    /// Sort direction sent with every listing request
    pub sort_direction: &'static str,
    /// Item limit for the top-rated rail
    pub top_rated_limit: u32,
    /// Item limit for the recently-added rail
    pub recent_limit: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            sort_field: "createdAt",
            sort_direction: "desc",
            top_rated_limit: 5,
            recent_limit: 6,
        }
    }
}

impl MarqueeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("MARQUEE_API_URL") {
            if !base_url.trim().is_empty() {
                config.api.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var("MARQUEE_API_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.api.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(page_size) = std::env::var("MARQUEE_PAGE_SIZE") {
            if let Ok(size) = page_size.parse::<u32>() {
                if size > 0 {
                    config.listing.page_size = size;
                }
            }
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Short timeouts and a tiny token lifetime keep failure-path tests fast.
    pub fn for_testing() -> Self {
        let mut config = Self::default();
        config.api.request_timeout = Duration::from_secs(2);
        config.auth.token_ttl = Duration::from_secs(5);
        config
    }
}
