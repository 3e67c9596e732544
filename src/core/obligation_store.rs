//! Obligation storage
//!
//! Durable keyed storage for obligation records. The store owns every
//! `Obligation` exclusively; settlement fields are only ever mutated through
//! the entry-locked [`ObligationStore::update_with`] hook used by the
//! settlement engine, so two concurrent settlements of the same obligation
//! serialize and the second re-reads state after the first commits.
//!
//! # Concurrency
//!
//! Backed by `DashMap`: operations on different obligations proceed fully in
//! parallel, there is no global ledger lock. Every mutation bumps the
//! record's `version` counter, which callers can use for optimistic
//! concurrency across read-modify-write round trips.

use crate::types::{
    DateRange, LedgerError, NewObligation, Obligation, ObligationId, ObligationUpdate,
};
use chrono::{Days, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Keyed obligation storage with per-record locking
#[derive(Debug, Default)]
pub struct ObligationStore {
    obligations: DashMap<ObligationId, Obligation>,
    /// Creation-order sequence, handed out once per insert
    next_seq: AtomicU64,
}

impl ObligationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            obligations: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a new obligation
    ///
    /// The caller (the engine facade) has already validated the request and
    /// resolved `customer_name` from the registry; the name is stored as a
    /// creation-time snapshot and never re-synchronized afterwards.
    /// Settlement state starts at zero.
    pub fn create(&self, request: NewObligation, customer_name: String) -> Obligation {
        let obligation = Obligation {
            id: Uuid::new_v4(),
            customer_id: request.customer_id,
            customer_name,
            amount: request.amount,
            kind: request.kind,
            settled_amount: Decimal::ZERO,
            is_settled: false,
            due_at: request.due_at,
            settled_at: None,
            description: request.description,
            created_at: Utc::now(),
            version: 0,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.obligations.insert(obligation.id, obligation.clone());
        obligation
    }

    /// Look up an obligation by id
    pub fn get(&self, id: ObligationId) -> Result<Obligation, LedgerError> {
        self.obligations
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::obligation_not_found(id))
    }

    /// Update the mutable non-settlement fields of an obligation
    ///
    /// `amount` is not updatable at all, and settlement fields move only
    /// through the settlement engine, so no update here can violate the
    /// `settled_amount <= amount` bound. Fields left as `None` are untouched.
    ///
    /// # Errors
    ///
    /// Returns `ObligationNotFound` for an unknown id, `Conflict` when
    /// `expected_version` is set and no longer matches the stored version.
    pub fn update(
        &self,
        id: ObligationId,
        request: ObligationUpdate,
    ) -> Result<Obligation, LedgerError> {
        self.update_with(id, |obligation| {
            if let Some(expected) = request.expected_version {
                if obligation.version != expected {
                    return Err(LedgerError::conflict(id, expected, obligation.version));
                }
            }
            if let Some(due_at) = request.due_at {
                obligation.due_at = due_at;
            }
            if let Some(description) = request.description.clone() {
                obligation.description = Some(description);
            }
            if let Some(kind) = request.kind {
                obligation.kind = kind;
            }
            Ok(())
        })
    }

    /// Atomically read-modify-write an obligation under its entry lock
    ///
    /// The closure runs while the record is exclusively locked; no other
    /// writer can interleave between the read and the write. The version
    /// counter is bumped after the closure succeeds. This is the only
    /// mutation path for settlement fields.
    pub(crate) fn update_with<F>(&self, id: ObligationId, f: F) -> Result<Obligation, LedgerError>
    where
        F: FnOnce(&mut Obligation) -> Result<(), LedgerError>,
    {
        let mut entry = self
            .obligations
            .get_mut(&id)
            .ok_or_else(|| LedgerError::obligation_not_found(id))?;
        let obligation = entry.value_mut();
        f(obligation)?;
        obligation.version += 1;
        Ok(obligation.clone())
    }

    /// Remove an obligation
    ///
    /// Unconditional hard delete; there is no separate settlement-event log
    /// to cascade into.
    ///
    /// # Errors
    ///
    /// Returns `ObligationNotFound` if the id is unknown.
    pub fn delete(&self, id: ObligationId) -> Result<(), LedgerError> {
        self.obligations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::obligation_not_found(id))
    }

    /// List obligations for display, newest-first by creation
    ///
    /// With a customer filter, only that customer's obligations are returned.
    pub fn list(&self, customer_filter: Option<crate::types::CustomerId>) -> Vec<Obligation> {
        let mut obligations: Vec<Obligation> = self
            .obligations
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|ob| customer_filter.is_none_or(|c| ob.customer_id == c))
            .collect();
        obligations.sort_by_key(|ob| std::cmp::Reverse(ob.seq));
        obligations
    }

    /// All obligations oldest-first, optionally filtered by creation date
    ///
    /// This is the single row source for reports, so on-screen previews and
    /// file exports enumerate exactly the same rows in the same order.
    pub fn in_creation_order(&self, range: Option<DateRange>) -> Vec<Obligation> {
        let mut obligations: Vec<Obligation> = self
            .obligations
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|ob| range.is_none_or(|r| r.contains_timestamp(ob.created_at)))
            .collect();
        obligations.sort_by_key(|ob| ob.seq);
        obligations
    }

    /// Unsettled obligations falling due within the next `days` days
    ///
    /// The window is inclusive on both ends: due today through due exactly
    /// `days` days from `today`.
    pub fn upcoming(&self, today: NaiveDate, days: u64) -> Vec<Obligation> {
        let horizon = today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        let mut obligations: Vec<Obligation> = self
            .obligations
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|ob| !ob.is_settled && ob.due_at >= today && ob.due_at <= horizon)
            .collect();
        obligations.sort_by_key(|ob| ob.due_at);
        obligations
    }

    /// Number of stored obligations
    pub fn len(&self) -> usize {
        self.obligations.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.obligations.is_empty()
    }
}
