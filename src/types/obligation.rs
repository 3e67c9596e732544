//! Obligation types for the ledger engine
//!
//! An obligation is a single debt or credit line against a customer: either a
//! receivable (the customer owes the business) or a payable (the business owes
//! the customer). Obligations accumulate partial settlements over time and
//! transition to a terminal settled state once the full face value is covered.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CustomerId;

/// Obligation identifier (engine-assigned, v4)
pub type ObligationId = Uuid;

/// Direction of an obligation, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    /// The customer owes the business
    Receivable,
    /// The business owes the customer
    Payable,
}

impl ObligationKind {
    /// Stable lowercase name, used in CSV output and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            ObligationKind::Receivable => "receivable",
            ObligationKind::Payable => "payable",
        }
    }
}

/// A single debt or credit line against a customer
///
/// # Invariants
///
/// After every mutation:
/// - `0 <= settled_amount <= amount`
/// - `is_settled == (settled_amount >= amount)`
/// - `amount` is never altered post-creation
///
/// `settled_amount` only ever increases, and only through the settlement
/// engine. `customer_name` is a snapshot taken when the obligation was
/// created; it is deliberately never re-synchronized with later customer
/// renames so that historical reports show the name at transaction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    /// Unique identifier, engine-assigned
    pub id: ObligationId,

    /// The customer this obligation belongs to
    pub customer_id: CustomerId,

    /// Customer name snapshot at creation time (never re-synchronized)
    pub customer_name: String,

    /// Original face value; positive, immutable after creation
    pub amount: Decimal,

    /// Whether this is a receivable or a payable
    pub kind: ObligationKind,

    /// Accumulated settlements; starts at zero, monotonically non-decreasing
    pub settled_amount: Decimal,

    /// Whether the obligation is fully settled (terminal state)
    ///
    /// Derived from `settled_amount >= amount` but persisted alongside it.
    pub is_settled: bool,

    /// Date the obligation falls due
    pub due_at: NaiveDate,

    /// Date of an explicit manual full settlement, if one happened
    ///
    /// Not set by partial settlements, even when the final partial settlement
    /// brings the obligation to the terminal state.
    pub settled_at: Option<NaiveDate>,

    /// Optional free-text description
    pub description: Option<String>,

    /// Creation timestamp, engine-assigned, immutable
    pub created_at: DateTime<Utc>,

    /// Optimistic concurrency counter, bumped on every mutation
    pub version: u64,

    /// Store-assigned creation sequence number
    ///
    /// Gives a stable creation order for listings and reports; the backing
    /// map iterates in arbitrary order.
    pub seq: u64,
}

impl Obligation {
    /// Outstanding balance: `amount - settled_amount`
    pub fn remaining(&self) -> Decimal {
        self.amount - self.settled_amount
    }
}
