//! Report extraction
//!
//! A report is extracted exactly once per call from the relevant store, in
//! creation order, optionally filtered by an inclusive date range (creation
//! date for customers and obligations, occurrence date for cash entries).
//! The on-screen preview reads the typed rows; the file export serializes
//! those same rows through [`Report::write_csv`]. Because both go through a
//! single extraction, preview and export are guaranteed to enumerate exactly
//! the same rows in the same order for the same filter.

pub mod csv_format;

use crate::core::aggregation::AggregationEngine;
use crate::core::cash_ledger::CashLedger;
use crate::core::customer_registry::CustomerRegistry;
use crate::core::obligation_store::ObligationStore;
use crate::types::{CashEntry, Customer, DashboardStats, DateRange, LedgerError, Obligation};
use clap::ValueEnum;
use std::io::Write;

/// Which entity a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Customer registry rows
    Customers,
    /// Obligation rows
    Obligations,
    /// Cash ledger rows
    Cash,
    /// Dashboard totals as a two-column sheet
    Summary,
}

/// An extracted report: typed rows in creation order
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Customers(Vec<Customer>),
    Obligations(Vec<Obligation>),
    Cash(Vec<CashEntry>),
    Summary(DashboardStats),
}

/// Extract a report from current store state
///
/// Row-bearing kinds honor the date range; `Summary` recomputes the
/// dashboard over everything, since totals filtered to a window would not be
/// balances at all.
pub fn extract(
    customers: &CustomerRegistry,
    obligations: &ObligationStore,
    cash: &CashLedger,
    kind: ReportKind,
    range: Option<DateRange>,
) -> Report {
    match kind {
        ReportKind::Customers => {
            let rows = customers
                .list()
                .into_iter()
                .filter(|c| range.is_none_or(|r| r.contains_timestamp(c.created_at)))
                .collect();
            Report::Customers(rows)
        }
        ReportKind::Obligations => Report::Obligations(obligations.in_creation_order(range)),
        ReportKind::Cash => Report::Cash(cash.list(range)),
        ReportKind::Summary => {
            let stats = AggregationEngine::new(customers, obligations, cash).dashboard_stats();
            Report::Summary(stats)
        }
    }
}

impl Report {
    /// Number of rows the report carries (a summary counts as one row)
    pub fn row_count(&self) -> usize {
        match self {
            Report::Customers(rows) => rows.len(),
            Report::Obligations(rows) => rows.len(),
            Report::Cash(rows) => rows.len(),
            Report::Summary(_) => 1,
        }
    }

    /// Serialize the report as CSV
    ///
    /// Writes exactly the rows carried by this report, in their extraction
    /// order.
    pub fn write_csv(&self, output: &mut dyn Write) -> Result<(), LedgerError> {
        match self {
            Report::Customers(rows) => csv_format::write_customers_csv(rows, output),
            Report::Obligations(rows) => csv_format::write_obligations_csv(rows, output),
            Report::Cash(rows) => csv_format::write_cash_csv(rows, output),
            Report::Summary(stats) => csv_format::write_summary_csv(stats, output),
        }
    }
}
