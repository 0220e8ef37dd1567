//! Transaction types
//!
//! A transaction is a single dated income or expense record owned by one user.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{normalize_amount, DomainError, Result, TransactionId, UserId};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent, counted against budgets
    Expense,
}

impl TransactionKind {
    /// Stable lowercase label used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(DomainError::InvalidKind(other.to_string())),
        }
    }
}

/// A stored income or expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub description: String,
    /// Non-negative, two fractional digits
    pub amount: Decimal,
    /// Free-text label, compared case-sensitively
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Validated input for a new transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Build a new transaction, normalizing the amount and rejecting an
    /// empty category.
    pub fn new(
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            description: description.into(),
            amount: normalize_amount(amount)?,
            category: validate_category(category.into())?,
            date,
        })
    }
}

/// Partial update of a transaction; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    /// Apply the same checks as [`NewTransaction::new`] to the present fields.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            amount: self.amount.map(normalize_amount).transpose()?,
            category: self.category.map(validate_category).transpose()?,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

/// Categories are kept verbatim but must not be blank.
pub(crate) fn validate_category(category: String) -> Result<String> {
    if category.trim().is_empty() {
        return Err(DomainError::EmptyCategory);
    }
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!("expense".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert!(matches!(
            "Expense".parse::<TransactionKind>(),
            Err(DomainError::InvalidKind(_))
        ));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&TransactionKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
        assert!(serde_json::from_str::<TransactionKind>("\"transfer\"").is_err());
    }

    #[test]
    fn test_new_transaction_normalizes_amount() {
        let tx = NewTransaction::new(
            TransactionKind::Expense,
            "groceries",
            dec!(49.999),
            "Food",
            date(2024, 1, 3),
        )
        .unwrap();
        assert_eq!(tx.amount.to_string(), "50.00");
        assert_eq!(tx.category, "Food");
    }

    #[test]
    fn test_new_transaction_rejects_negative_and_blank_category() {
        let negative = NewTransaction::new(
            TransactionKind::Income,
            "refund",
            dec!(-1),
            "Misc",
            date(2024, 1, 3),
        );
        assert!(matches!(negative, Err(DomainError::NegativeAmount(_))));

        let blank = NewTransaction::new(
            TransactionKind::Income,
            "salary",
            dec!(1),
            "  ",
            date(2024, 1, 3),
        );
        assert_eq!(blank, Err(DomainError::EmptyCategory));
    }

    #[test]
    fn test_patch_validation() {
        let patch = TransactionPatch {
            amount: Some(dec!(12.5)),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(patch.amount.unwrap().to_string(), "12.50");
        assert!(!patch.is_empty());
        assert!(TransactionPatch::default().is_empty());

        let bad = TransactionPatch {
            category: Some(String::new()),
            ..Default::default()
        }
        .validated();
        assert_eq!(bad, Err(DomainError::EmptyCategory));
    }
}
