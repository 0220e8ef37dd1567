//! Spendwise Types - Canonical domain types for the personal finance tracker
//!
//! This crate contains the foundational types shared by every other spendwise
//! crate, with zero dependencies on them:
//!
//! - Identity aliases (UserId, TransactionId, BudgetId)
//! - Amounts with fixed 2-decimal precision
//! - Transactions (income / expense records)
//! - Budgets (per-category monthly ceilings)
//! - Calendar months used to scope aggregation
//!
//! # Ownership
//!
//! Every [`Transaction`] and [`Budget`] belongs to exactly one user. The types
//! carry the owner id; scoping of reads and writes is enforced by the store.

pub mod amount;
pub mod budget;
pub mod error;
pub mod month;
pub mod transaction;
pub mod user;

pub use amount::*;
pub use budget::*;
pub use error::*;
pub use month::*;
pub use transaction::*;
pub use user::*;

/// Identifier of a registered user
pub type UserId = i64;

/// Identifier of a stored transaction
pub type TransactionId = i64;

/// Identifier of a stored budget
pub type BudgetId = i64;
