//! Core business logic module
//!
//! This module contains the ledger's core components:
//! - `customer_registry` - identity and contact data for customers
//! - `obligation_store` - keyed obligation storage with per-record locking
//! - `settlement` - the only valid mutation path for settlement state
//! - `cash_ledger` - the cash/POS movement log
//! - `aggregation` - derived views, recomputed on every call
//! - `engine` - the facade coordinating all of the above

pub mod aggregation;
pub mod cash_ledger;
pub mod customer_registry;
pub mod engine;
pub mod obligation_store;
pub mod settlement;

pub use aggregation::AggregationEngine;
pub use cash_ledger::CashLedger;
pub use customer_registry::CustomerRegistry;
pub use engine::LedgerEngine;
pub use obligation_store::ObligationStore;
pub use settlement::SettlementEngine;
