//! Exchange rate records and the lookback window used to find them.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Inclusive date range ending on the purchase date.
///
/// The most recent rate published inside this range is the one used for a
/// conversion, so rates are never taken from after the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl LookbackWindow {
    /// Length of the lookback in calendar months.
    pub const MONTHS: u32 = 6;

    /// Builds the window `[date - 6 months, date]`.
    ///
    /// A day that does not exist in the target month rolls over into the
    /// following month, so 2024-08-31 looks back to 2024-03-02.
    pub fn ending_on(date: NaiveDate) -> Self {
        let start = date
            .checked_sub_months(Months::new(Self::MONTHS))
            .map(|clamped| {
                // chrono clamps to the month end; add back the dropped days
                let overflow = date.day() - clamped.day();
                clamped
                    .checked_add_days(Days::new(u64::from(overflow)))
                    .unwrap_or(clamped)
            })
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// A single published rate as returned by the feed.
///
/// The rate stays in its published string form until a conversion needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    pub record_date: NaiveDate,
    pub currency: String,
    pub exchange_rate: String,
}

impl RateRecord {
    /// Parses the published rate.
    pub fn rate(&self) -> Result<Decimal, DomainError> {
        let raw = self.exchange_rate.trim();
        Decimal::from_str(raw).map_err(|_| DomainError::InvalidRate(self.exchange_rate.clone()))
    }
}
