//! Storefront Dashboard Library
//!
//! Persistence and statistics for a small business dashboard: products and
//! purchases stored as whole JSON collections in a key-value store, a
//! client-side session, mock and remote auth providers, and the REST API
//! that serves the same data.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
