//! Monetary amounts with fixed 2-decimal precision
//!
//! Amounts are plain [`Decimal`] values. Everything that enters the system is
//! rounded half-away-from-zero to two places and rescaled, so `200` is held
//! (and persisted) as `200.00`.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::{DomainError, Result};

/// Number of fractional digits kept for every stored amount
pub const AMOUNT_SCALE: u32 = 2;

/// Largest accepted amount, matching a `DECIMAL(10, 2)` column
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, AMOUNT_SCALE);

/// Reject negative or oversized values, then round to [`AMOUNT_SCALE`] places.
pub fn normalize_amount(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::NegativeAmount(amount.to_string()));
    }
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MAX_AMOUNT {
        return Err(DomainError::AmountTooLarge(amount.to_string()));
    }
    // -0 keeps its sign bit through rounding
    rounded.set_sign_positive(true);
    rounded.rescale(AMOUNT_SCALE);
    if rounded.scale() != AMOUNT_SCALE {
        return Err(DomainError::InvalidAmount(amount.to_string()));
    }
    Ok(rounded)
}

/// Parse a stored amount (`"200.00"`) back into a normalized decimal.
pub fn parse_amount(text: &str) -> Result<Decimal> {
    let value = Decimal::from_str(text.trim())
        .map_err(|_| DomainError::InvalidAmount(text.to_string()))?;
    normalize_amount(value)
}
