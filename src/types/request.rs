//! Validated request types for the engine boundary
//!
//! Every external input is modeled as an explicitly-typed request structure
//! with required and optional fields enumerated, rejected with
//! [`LedgerError::InvalidArgument`] on violation. The engine never accepts an
//! open-ended untyped map; validation runs before any store is touched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{CashKind, CashMethod, CustomerId, LedgerError, ObligationKind};

/// Request to register a new customer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCustomer {
    /// Display name; required, non-empty after trimming
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub notes: Option<String>,
}

impl NewCustomer {
    /// Validate the request, returning `InvalidArgument` on violation
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::invalid_argument("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Request to replace a customer's contact fields
///
/// Identity (`id`, `created_at`) never changes; the whole contact payload is
/// replaced, so omitted optional fields clear the stored value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerUpdate {
    /// Display name; required, non-empty after trimming
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub notes: Option<String>,
}

impl CustomerUpdate {
    /// Validate the request, returning `InvalidArgument` on violation
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::invalid_argument("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Request to create a new obligation
///
/// The customer name is not part of the request; the engine snapshots it from
/// the registry at creation time after the referential check passes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewObligation {
    /// The customer this obligation is against; must resolve in the registry
    pub customer_id: CustomerId,

    /// Face value; must be strictly positive
    pub amount: Decimal,

    /// Receivable or payable; fixed for the life of the obligation
    pub kind: ObligationKind,

    /// Date the obligation falls due
    pub due_at: NaiveDate,

    pub description: Option<String>,
}

impl NewObligation {
    /// Validate the request, returning `InvalidArgument` on violation
    ///
    /// The referential check against the registry is the engine's job; this
    /// only covers the fields themselves.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument("amount", "must be positive"));
        }
        Ok(())
    }
}

/// Request to update an obligation's mutable fields
///
/// `amount` is deliberately absent: the face value is immutable after
/// creation, so an edit can never violate the settlement bound. Settlement
/// fields are absent too; those move only through the settlement engine.
///
/// Unlike [`CustomerUpdate`], which replaces the whole contact payload,
/// this is a merge: `None` fields are left untouched. A stored description
/// can therefore be overwritten but not cleared through this request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ObligationUpdate {
    pub due_at: Option<NaiveDate>,

    pub description: Option<String>,

    pub kind: Option<ObligationKind>,

    /// Optimistic concurrency guard
    ///
    /// When set, the update fails with `Conflict` unless the stored version
    /// still matches, giving the caller compare-and-swap semantics across a
    /// read-modify-write round trip.
    pub expected_version: Option<u64>,
}

/// Request to record a cash movement
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCashEntry {
    /// Income or expense
    pub kind: CashKind,

    /// Cash or card
    pub method: CashMethod,

    /// Movement amount; must be strictly positive
    pub amount: Decimal,

    /// Required free-text description
    pub description: String,

    /// Date the movement happened; defaults to today when omitted
    pub occurred_at: Option<NaiveDate>,
}

impl NewCashEntry {
    /// Validate the request, returning `InvalidArgument` on violation
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument("amount", "must be positive"));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::invalid_argument(
                "description",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
