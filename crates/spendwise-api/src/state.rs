//! Application state shared across handlers
//!
//! Contains the database handle, the authentication service and the clock
//! that fixes "the current month" for budget and breakdown requests.

use std::sync::Arc;

use spendwise_auth::AuthService;
use spendwise_core::{Clock, SystemClock};
use spendwise_db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connections
    pub db: Arc<Database>,
    /// Authentication service
    pub auth: Arc<AuthService>,
    /// Source of the reference date
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state on the system clock
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self::with_clock(db, auth, Arc::new(SystemClock))
    }

    /// Create a new application state with an explicit clock
    pub fn with_clock(db: Arc<Database>, auth: Arc<AuthService>, clock: Arc<dyn Clock>) -> Self {
        Self { db, auth, clock }
    }
}
