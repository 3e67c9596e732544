//! Derived summary types
//!
//! Summaries are never persisted. Every value here is recomputed from the
//! current store state on each call, which removes the entire class of
//! cache-invalidation bugs a stored running total would invite.

use rust_decimal::Decimal;
use serde::Serialize;

use super::CustomerId;

/// Per-customer obligation totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    /// The customer these totals belong to
    pub customer_id: CustomerId,

    /// Sum of face values over all of the customer's obligations
    pub total_debt: Decimal,

    /// Sum of accumulated settlements
    pub total_paid: Decimal,

    /// `total_debt - total_paid`
    pub total_remaining: Decimal,

    /// Number of obligations on record for the customer
    pub obligation_count: usize,
}

/// Global dashboard totals
///
/// `total_balance = cash_balance + pos_balance` and
/// `net_position = total_balance + total_receivable - total_payable`
/// hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Sum of unsettled receivable remainders
    pub total_receivable: Decimal,

    /// Sum of unsettled payable remainders
    pub total_payable: Decimal,

    /// Number of customers in the registry
    pub total_customers: usize,

    /// Signed fold over cash-method entries
    pub cash_balance: Decimal,

    /// Signed fold over card-method entries
    pub pos_balance: Decimal,

    /// `cash_balance + pos_balance`
    pub total_balance: Decimal,

    /// Total liquid balance plus outstanding receivables minus outstanding payables
    pub net_position: Decimal,
}
