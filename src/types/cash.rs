//! Cash ledger types
//!
//! A cash entry is a single income or expense movement through the till or
//! the card terminal. Entries carry no settlement concept: each one is fully
//! determined at creation and mutable only by deletion.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cash entry identifier (engine-assigned, v4)
pub type CashEntryId = Uuid;

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashKind {
    /// Money in
    Income,
    /// Money out
    Expense,
}

impl CashKind {
    /// Stable lowercase name, used in CSV output and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            CashKind::Income => "income",
            CashKind::Expense => "expense",
        }
    }
}

/// Settlement method of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashMethod {
    /// Physical cash through the till
    Cash,
    /// Card / POS terminal
    Card,
}

impl CashMethod {
    /// Stable lowercase name, used in CSV output and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            CashMethod::Cash => "cash",
            CashMethod::Card => "card",
        }
    }
}

/// A single cash or POS movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    /// Unique identifier, engine-assigned
    pub id: CashEntryId,

    /// Income or expense
    pub kind: CashKind,

    /// Cash or card
    pub method: CashMethod,

    /// Movement amount; always positive, direction comes from `kind`
    pub amount: Decimal,

    /// Required free-text description
    pub description: String,

    /// Date the movement actually happened
    pub occurred_at: NaiveDate,

    /// Creation timestamp, engine-assigned
    pub created_at: DateTime<Utc>,

    /// Store-assigned creation sequence number
    pub seq: u64,
}

impl CashEntry {
    /// Signed contribution of this entry to a balance fold
    ///
    /// Income adds, expense subtracts.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            CashKind::Income => self.amount,
            CashKind::Expense => -self.amount,
        }
    }
}
