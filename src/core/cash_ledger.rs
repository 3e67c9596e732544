//! Cash ledger
//!
//! Logically append-only log of cash and POS movements. Entries are
//! independent of each other and of obligation locks; each one is atomic and
//! final at creation and mutable only by deletion.

use crate::types::{CashEntry, CashEntryId, DateRange, LedgerError, NewCashEntry};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Keyed cash entry storage
#[derive(Debug, Default)]
pub struct CashLedger {
    entries: DashMap<CashEntryId, CashEntry>,
    /// Creation-order sequence, handed out once per insert
    next_seq: AtomicU64,
}

impl CashLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Record a cash movement
    ///
    /// When `occurred_at` is omitted the entry is dated today.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a non-positive amount or blank
    /// description.
    pub fn record(&self, request: NewCashEntry) -> Result<CashEntry, LedgerError> {
        request.validate()?;

        let now = Utc::now();
        let entry = CashEntry {
            id: Uuid::new_v4(),
            kind: request.kind,
            method: request.method,
            amount: request.amount,
            description: request.description,
            occurred_at: request.occurred_at.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    /// Look up an entry by id
    pub fn get(&self, id: CashEntryId) -> Result<CashEntry, LedgerError> {
        self.entries
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::cash_entry_not_found(id))
    }

    /// Remove an entry
    ///
    /// # Errors
    ///
    /// Returns `CashEntryNotFound` if the id is unknown.
    pub fn delete(&self, id: CashEntryId) -> Result<(), LedgerError> {
        self.entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::cash_entry_not_found(id))
    }

    /// Entries in creation order, optionally filtered by occurrence date
    ///
    /// Used both for raw display and as aggregation input, so both see the
    /// same rows in the same order.
    pub fn list(&self, range: Option<DateRange>) -> Vec<CashEntry> {
        let mut entries: Vec<CashEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|e| range.is_none_or(|r| r.contains_date(e.occurred_at)))
            .collect();
        entries.sort_by_key(|e| e.seq);
        entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
