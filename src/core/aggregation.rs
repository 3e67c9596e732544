//! Aggregation engine
//!
//! Computes derived views from the obligation store, cash ledger, and
//! customer registry. Every call is a pure read-and-compute over current
//! store state at call time; nothing is cached, so a caller can never
//! observe a stale derived value. Reads take no extra lock — minor staleness
//! across concurrently-settling obligations is tolerable precisely because
//! the result is recomputed on every call.

use crate::core::cash_ledger::CashLedger;
use crate::core::customer_registry::CustomerRegistry;
use crate::core::obligation_store::ObligationStore;
use crate::types::{
    CashMethod, CustomerId, CustomerSummary, DashboardStats, LedgerError, ObligationKind,
};
use rust_decimal::Decimal;

/// Read-only derived views over the three stores
///
/// Borrows the stores; owns no state and never mutates anything.
pub struct AggregationEngine<'s> {
    customers: &'s CustomerRegistry,
    obligations: &'s ObligationStore,
    cash: &'s CashLedger,
}

impl<'s> AggregationEngine<'s> {
    /// Create an aggregation engine over the given stores
    pub fn new(
        customers: &'s CustomerRegistry,
        obligations: &'s ObligationStore,
        cash: &'s CashLedger,
    ) -> Self {
        Self {
            customers,
            obligations,
            cash,
        }
    }

    /// Fold a customer's obligations into debt/paid/remaining totals
    ///
    /// A known customer with no obligations gets a zero-valued summary, not
    /// an error; only an id the registry does not recognize fails.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the registry does not know the id.
    pub fn customer_summary(&self, customer_id: CustomerId) -> Result<CustomerSummary, LedgerError> {
        if !self.customers.contains(customer_id) {
            return Err(LedgerError::customer_not_found(customer_id));
        }

        let mut total_debt = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;
        let mut obligation_count = 0;

        for obligation in self.obligations.list(Some(customer_id)) {
            total_debt += obligation.amount;
            total_paid += obligation.settled_amount;
            obligation_count += 1;
        }

        Ok(CustomerSummary {
            customer_id,
            total_debt,
            total_paid,
            total_remaining: total_debt - total_paid,
            obligation_count,
        })
    }

    /// Global dashboard totals
    ///
    /// Receivable and payable totals sum the unsettled remainders by kind;
    /// cash and POS balances are signed folds over the cash ledger split by
    /// method. Settled obligations contribute nothing.
    pub fn dashboard_stats(&self) -> DashboardStats {
        let mut total_receivable = Decimal::ZERO;
        let mut total_payable = Decimal::ZERO;

        for obligation in self.obligations.in_creation_order(None) {
            if obligation.is_settled {
                continue;
            }
            match obligation.kind {
                ObligationKind::Receivable => total_receivable += obligation.remaining(),
                ObligationKind::Payable => total_payable += obligation.remaining(),
            }
        }

        let mut cash_balance = Decimal::ZERO;
        let mut pos_balance = Decimal::ZERO;

        for entry in self.cash.list(None) {
            match entry.method {
                CashMethod::Cash => cash_balance += entry.signed_amount(),
                CashMethod::Card => pos_balance += entry.signed_amount(),
            }
        }

        let total_balance = cash_balance + pos_balance;

        DashboardStats {
            total_receivable,
            total_payable,
            total_customers: self.customers.len(),
            cash_balance,
            pos_balance,
            total_balance,
            net_position: total_balance + total_receivable - total_payable,
        }
    }
}
