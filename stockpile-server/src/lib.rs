//! stockpile-server: HTTP API for the stockpile inventory backend
//!
//! Issues bearer tokens, serves ownership-scoped item CRUD with stock
//! counters, and a read-only blog listing.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
