//! Integration tests for Marquee
//!
//! These tests verify the integration between different components of the
//! system: the authenticated pipeline against the in-memory backend, the
//! listing workflow through the view controllers, and the CRUD/watchlist/
//! dashboard flows end to end within the process.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/auth_pipeline.rs"]
mod auth_pipeline;

#[path = "integration/listing_workflow.rs"]
mod listing_workflow;

#[path = "integration/catalog_crud.rs"]
mod catalog_crud;

#[path = "integration/watchlist_workflow.rs"]
mod watchlist_workflow;

#[path = "integration/dashboard_aggregation.rs"]
mod dashboard_aggregation;
