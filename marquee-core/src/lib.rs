//! Marquee Core - Session, configuration, and shared foundations
//!
//! Provides the building blocks shared by every Marquee crate: centralized
//! configuration, tracing setup, and the auth layer that models the external
//! identity provider behind an injectable trait with a process-wide session
//! store.

pub mod auth;
pub mod config;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use auth::{
    AuthError, BearerToken, FakeIdentityProvider, IdentityProvider, Session, SessionStore,
};
pub use config::MarqueeConfig;
