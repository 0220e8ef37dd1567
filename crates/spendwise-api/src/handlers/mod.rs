//! API Handlers
//!
//! Request handlers for all API endpoints.
//! Each module handles a specific domain.

pub mod auth;
pub mod budget;
pub mod health;
pub mod stats;
pub mod transaction;

pub use health::*;
