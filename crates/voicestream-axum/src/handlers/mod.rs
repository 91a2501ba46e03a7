//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to the core services.

pub mod catalog;
pub mod events;
pub mod requests;
pub mod sessions;
pub mod settings;
