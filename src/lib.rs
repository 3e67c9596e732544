//! Ledger Engine Library
//! # Overview
//!
//! This library provides an in-memory bookkeeping engine tracking customer
//! obligations, their settlement, and a cash ledger, with aggregation and
//! CSV reporting on top.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, Obligation, CashEntry, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Facade coordinating all stores
//!   - [`core::customer_registry`] - Customer directory
//!   - [`core::obligation_store`] - Obligation state and versioned updates
//!   - [`core::settlement`] - Partial and full settlement rules
//!   - [`core::cash_ledger`] - Standalone income/expense entries
//!   - [`core::aggregation`] - Per-customer summaries and dashboard stats
//! - [`io`] - Operation file parsing
//! - [`replay`] - Replaying an operation file through the engine
//! - [`report`] - Report extraction and CSV output
//!
//! # Obligation Lifecycle
//!
//! An obligation is created against a customer with a fixed face amount and
//! a kind (receivable or payable). Settlement moves it toward that amount:
//!
//! - **Partial settlement**: Credit a positive amount against the remainder;
//!   paying more than remains is rejected, never clamped
//! - **Full settlement**: Mark the obligation settled on a given date
//!
//! Once settled, an obligation is terminal: further settlements are
//! rejected. The customer name is snapshotted at creation and never changes
//! afterwards, even if the customer record is renamed.
//!
//! # Cash Ledger
//!
//! Cash entries are independent of obligations. Each entry is income or
//! expense, paid by cash or card, and contributes its signed amount to the
//! running balances reported by the dashboard.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod replay;
pub mod report;
pub mod types;

pub use core::{AggregationEngine, CashLedger, CustomerRegistry, LedgerEngine, ObligationStore, SettlementEngine};
pub use report::{Report, ReportKind};
pub use types::{
    CashEntry, CashEntryId, CashKind, CashMethod, Customer, CustomerId, CustomerSummary,
    DashboardStats, DateRange, LedgerError, Obligation, ObligationId, ObligationKind,
};
