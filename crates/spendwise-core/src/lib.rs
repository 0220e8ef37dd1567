//! Spendwise Core - Budget-vs-spending aggregation
//!
//! The engine is purely functional: it takes the transactions and budgets
//! already fetched for one user and derives
//! - all-time income / expense totals and balance
//! - per-budget spending for a given calendar month
//! - the per-category expense breakdown for a given calendar month
//!
//! Nothing is cached and nothing is persisted. The reference month is always
//! an explicit argument; callers obtain it from a [`Clock`] at the request
//! boundary so results are reproducible in tests.

pub mod aggregation;
pub mod clock;

pub use aggregation::*;
pub use clock::*;
