//! Types module
//!
//! Contains core data structures used throughout the engine:
//! - `customer`: customer registry types
//! - `obligation`: obligation records and their state machine fields
//! - `cash`: cash ledger entries
//! - `summary`: derived (never persisted) summary views
//! - `request`: validated request types for the engine boundary
//! - `error`: the crate-wide error taxonomy

pub mod cash;
pub mod customer;
pub mod error;
pub mod obligation;
pub mod request;
pub mod summary;

pub use cash::{CashEntry, CashEntryId, CashKind, CashMethod};
pub use customer::{Customer, CustomerId};
pub use error::LedgerError;
pub use obligation::{Obligation, ObligationId, ObligationKind};
pub use request::{CustomerUpdate, NewCashEntry, NewCustomer, NewObligation, ObligationUpdate};
pub use summary::{CustomerSummary, DashboardStats};

use chrono::{DateTime, NaiveDate, Utc};

/// An inclusive date range used to filter listings and reports
///
/// Both endpoints are inclusive: a record dated exactly `start` or exactly
/// `end` is inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LedgerError> {
        if start > end {
            return Err(LedgerError::invalid_argument(
                "date_range",
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(DateRange { start, end })
    }

    /// Whether a plain date falls within the range
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether a timestamp's calendar date falls within the range
    pub fn contains_timestamp(&self, at: DateTime<Utc>) -> bool {
        self.contains_date(at.date_naive())
    }
}
