//! Reference-instant source
//!
//! "Current month" is resolved once per request from a [`Clock`] and handed to
//! the engine as a [`YearMonth`].

use chrono::{NaiveDate, Utc};
use spendwise_types::YearMonth;

/// Supplies today's date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Month containing [`Clock::today`]
    fn current_month(&self) -> YearMonth {
        YearMonth::from(self.today())
    }
}

/// Wall clock, evaluated in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
