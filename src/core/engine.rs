//! Ledger engine facade
//!
//! This module provides the `LedgerEngine` that backs the request/response
//! boundary by coordinating the customer registry, obligation store, cash
//! ledger, settlement engine, and aggregation views.
//!
//! The facade enforces the cross-store rules the individual stores cannot see
//! on their own:
//! - Referential validation of `customer_id` at obligation-creation time
//! - The customer-name snapshot copied onto each new obligation
//! - Settlement going through the settlement engine only, never through a
//!   generic field update

use crate::core::aggregation::AggregationEngine;
use crate::core::cash_ledger::CashLedger;
use crate::core::customer_registry::CustomerRegistry;
use crate::core::obligation_store::ObligationStore;
use crate::core::settlement::SettlementEngine;
use crate::report::{self, Report, ReportKind};
use crate::types::{
    CashEntry, CashEntryId, Customer, CustomerId, CustomerSummary, CustomerUpdate, DashboardStats,
    DateRange, LedgerError, NewCashEntry, NewCustomer, NewObligation, Obligation, ObligationId,
    ObligationUpdate,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::debug;

/// Bookkeeping engine coordinating the three stores
///
/// All mutating methods are safe to call concurrently: every store locks per
/// record, and operations on different records never contend. Derived views
/// are recomputed from current store state on every call.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    customers: CustomerRegistry,
    obligations: ObligationStore,
    cash: CashLedger,
}

impl LedgerEngine {
    /// Create an empty engine with no customers, obligations, or cash entries
    pub fn new() -> Self {
        LedgerEngine {
            customers: CustomerRegistry::new(),
            obligations: ObligationStore::new(),
            cash: CashLedger::new(),
        }
    }

    // --- customers ---

    /// Register a new customer
    pub fn create_customer(&self, request: NewCustomer) -> Result<Customer, LedgerError> {
        let customer = self.customers.create(request)?;
        debug!(customer = %customer.id, name = %customer.name, "customer created");
        Ok(customer)
    }

    /// Replace a customer's contact fields
    ///
    /// Obligations keep the name snapshot taken when they were created; a
    /// rename here intentionally does not rewrite history.
    pub fn update_customer(
        &self,
        id: CustomerId,
        request: CustomerUpdate,
    ) -> Result<Customer, LedgerError> {
        let customer = self.customers.update(id, request)?;
        debug!(customer = %customer.id, "customer updated");
        Ok(customer)
    }

    /// Look up a customer
    pub fn get_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.customers.get(id)
    }

    /// Remove a customer
    pub fn delete_customer(&self, id: CustomerId) -> Result<(), LedgerError> {
        self.customers.delete(id)?;
        debug!(customer = %id, "customer deleted");
        Ok(())
    }

    /// All customers in creation order
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.list()
    }

    // --- obligations ---

    /// Create a new obligation against a customer
    ///
    /// Validates the request, resolves the customer in the registry, and
    /// snapshots the customer name onto the record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a non-positive amount, `CustomerNotFound`
    /// if `customer_id` does not resolve.
    pub fn create_obligation(&self, request: NewObligation) -> Result<Obligation, LedgerError> {
        request.validate()?;
        let customer = self.customers.get(request.customer_id)?;

        let obligation = self.obligations.create(request, customer.name);
        debug!(
            obligation = %obligation.id,
            customer = %obligation.customer_id,
            amount = %obligation.amount,
            kind = obligation.kind.as_str(),
            "obligation created"
        );
        Ok(obligation)
    }

    /// Update an obligation's mutable non-settlement fields
    pub fn update_obligation(
        &self,
        id: ObligationId,
        request: ObligationUpdate,
    ) -> Result<Obligation, LedgerError> {
        let obligation = self.obligations.update(id, request)?;
        debug!(obligation = %obligation.id, version = obligation.version, "obligation updated");
        Ok(obligation)
    }

    /// Look up an obligation
    pub fn get_obligation(&self, id: ObligationId) -> Result<Obligation, LedgerError> {
        self.obligations.get(id)
    }

    /// Remove an obligation
    pub fn delete_obligation(&self, id: ObligationId) -> Result<(), LedgerError> {
        self.obligations.delete(id)?;
        debug!(obligation = %id, "obligation deleted");
        Ok(())
    }

    /// Obligations newest-first, optionally for a single customer
    pub fn list_obligations(&self, customer_id: Option<CustomerId>) -> Vec<Obligation> {
        self.obligations.list(customer_id)
    }

    /// Unsettled obligations due within the next `days` days
    pub fn upcoming_obligations(&self, days: u64) -> Vec<Obligation> {
        self.obligations.upcoming(Utc::now().date_naive(), days)
    }

    // --- settlement ---

    /// Apply a partial settlement against an obligation
    ///
    /// Distinct from [`update_obligation`](Self::update_obligation): carries
    /// settlement semantics, not a field overwrite.
    pub fn apply_partial_settlement(
        &self,
        id: ObligationId,
        amount: Decimal,
    ) -> Result<Obligation, LedgerError> {
        let obligation = SettlementEngine::new(&self.obligations).apply_partial(id, amount)?;
        debug!(
            obligation = %obligation.id,
            settled = %obligation.settled_amount,
            remaining = %obligation.remaining(),
            terminal = obligation.is_settled,
            "partial settlement applied"
        );
        Ok(obligation)
    }

    /// Mark an obligation fully settled as of `settled_at`
    pub fn mark_fully_settled(
        &self,
        id: ObligationId,
        settled_at: NaiveDate,
    ) -> Result<Obligation, LedgerError> {
        let obligation = SettlementEngine::new(&self.obligations).mark_fully_settled(id, settled_at)?;
        debug!(obligation = %obligation.id, %settled_at, "obligation marked fully settled");
        Ok(obligation)
    }

    // --- cash ---

    /// Record a cash movement
    pub fn record_cash_entry(&self, request: NewCashEntry) -> Result<CashEntry, LedgerError> {
        let entry = self.cash.record(request)?;
        debug!(
            entry = %entry.id,
            kind = entry.kind.as_str(),
            method = entry.method.as_str(),
            amount = %entry.amount,
            "cash entry recorded"
        );
        Ok(entry)
    }

    /// Remove a cash entry
    pub fn delete_cash_entry(&self, id: CashEntryId) -> Result<(), LedgerError> {
        self.cash.delete(id)?;
        debug!(entry = %id, "cash entry deleted");
        Ok(())
    }

    /// Cash entries in creation order, optionally filtered by occurrence date
    pub fn list_cash_entries(&self, range: Option<DateRange>) -> Vec<CashEntry> {
        self.cash.list(range)
    }

    // --- derived views ---

    /// Per-customer obligation totals, recomputed from current state
    pub fn customer_summary(&self, customer_id: CustomerId) -> Result<CustomerSummary, LedgerError> {
        AggregationEngine::new(&self.customers, &self.obligations, &self.cash)
            .customer_summary(customer_id)
    }

    /// Global dashboard totals, recomputed from current state
    pub fn dashboard_stats(&self) -> DashboardStats {
        AggregationEngine::new(&self.customers, &self.obligations, &self.cash).dashboard_stats()
    }

    /// Extract a report over current state
    ///
    /// The same call backs both the interactive preview and the file export,
    /// so the two always enumerate identical rows for identical filters.
    pub fn report(&self, kind: ReportKind, range: Option<DateRange>) -> Report {
        report::extract(&self.customers, &self.obligations, &self.cash, kind, range)
    }
}
