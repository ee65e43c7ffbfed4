//! End-to-end tests for Marquee
//!
//! Full user journeys through the view controllers, client pipeline, and
//! in-memory backend, exactly as the CLI wires them together.

#[path = "browse_session.rs"]
mod browse_session;
