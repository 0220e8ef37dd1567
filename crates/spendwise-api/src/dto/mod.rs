//! Data Transfer Objects
//!
//! Request and response structures for the API. Amounts travel as JSON
//! numbers and are held as decimals internally.

pub mod auth;
pub mod budget;
pub mod common;
pub mod stats;
pub mod transaction;

pub use auth::*;
pub use budget::*;
pub use common::*;
pub use stats::*;
pub use transaction::*;
