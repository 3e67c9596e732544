//! Replay pipeline
//!
//! Applies an operations CSV to a [`LedgerEngine`], wiring the streaming
//! reader to the engine's request boundary. Labels from the file are mapped
//! to engine-assigned ids as rows bind them, so later rows can reference
//! earlier ones.
//!
//! Per-row failures (parse errors, unknown labels, rejected requests) are
//! logged at warn level and skipped; replay continues with the next row.
//! Only file-level problems are fatal.

use crate::core::LedgerEngine;
use crate::io::{Operation, OpsReader};
use crate::types::{CustomerId, NewCashEntry, NewCustomer, NewObligation, ObligationId};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::types::LedgerError;

/// Counts of applied and skipped rows after a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayOutcome {
    /// Rows applied successfully
    pub applied: usize,
    /// Rows skipped because of a parse failure or a rejected request
    pub rejected: usize,
}

/// Replay an operations file into the engine
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened. Individual row failures are
/// not errors; they are counted in [`ReplayOutcome::rejected`].
pub fn replay(path: &Path, engine: &LedgerEngine) -> Result<ReplayOutcome, LedgerError> {
    let reader = OpsReader::new(path)?;

    let mut customers: HashMap<String, CustomerId> = HashMap::new();
    let mut obligations: HashMap<String, ObligationId> = HashMap::new();
    let mut outcome = ReplayOutcome::default();

    for item in reader {
        let operation = match item {
            Ok(operation) => operation,
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                outcome.rejected += 1;
                continue;
            }
        };

        let applied = apply(engine, operation, &mut customers, &mut obligations);
        match applied {
            Ok(()) => outcome.applied += 1,
            Err(e) => {
                warn!(error = %e, "row rejected by engine");
                outcome.rejected += 1;
            }
        }
    }

    Ok(outcome)
}

fn apply(
    engine: &LedgerEngine,
    operation: Operation,
    customers: &mut HashMap<String, CustomerId>,
    obligations: &mut HashMap<String, ObligationId>,
) -> Result<(), LedgerError> {
    match operation {
        Operation::Customer { label, name, notes } => {
            let customer = engine.create_customer(NewCustomer {
                name,
                phone: None,
                address: None,
                tax_number: None,
                notes,
            })?;
            customers.insert(label, customer.id);
        }
        Operation::Obligation {
            label,
            customer_label,
            kind,
            amount,
            due_at,
            description,
        } => {
            let customer_id = *customers.get(&customer_label).ok_or_else(|| {
                LedgerError::invalid_argument(
                    "customer",
                    format!("unknown customer label '{}'", customer_label),
                )
            })?;
            let obligation = engine.create_obligation(NewObligation {
                customer_id,
                amount,
                kind,
                due_at,
                description,
            })?;
            obligations.insert(label, obligation.id);
        }
        Operation::Cash {
            kind,
            method,
            amount,
            occurred_at,
            description,
        } => {
            engine.record_cash_entry(NewCashEntry {
                kind,
                method,
                amount,
                description,
                occurred_at,
            })?;
        }
        Operation::Settle {
            obligation_label,
            amount,
        } => {
            let id = resolve_obligation(obligations, &obligation_label)?;
            engine.apply_partial_settlement(id, amount)?;
        }
        Operation::SettleFull {
            obligation_label,
            settled_at,
        } => {
            let id = resolve_obligation(obligations, &obligation_label)?;
            engine.mark_fully_settled(id, settled_at)?;
        }
    }
    Ok(())
}

fn resolve_obligation(
    obligations: &HashMap<String, ObligationId>,
    label: &str,
) -> Result<ObligationId, LedgerError> {
    obligations.get(label).copied().ok_or_else(|| {
        LedgerError::invalid_argument("label", format!("unknown obligation label '{}'", label))
    })
}
