//! Settlement engine
//!
//! The only valid way to increase an obligation's `settled_amount`. All
//! settlement mutations run inside [`ObligationStore::update_with`], so the
//! read of `remaining` and the write of the new total happen under the same
//! per-obligation lock — two concurrent settlements cannot both observe the
//! old remainder and overshoot together.
//!
//! # State machine
//!
//! ```text
//! CREATED --apply_partial(x), x < remaining--> PARTIALLY_SETTLED
//! CREATED | PARTIALLY_SETTLED --apply_partial(x), x == remaining--> SETTLED
//! any non-terminal state --mark_fully_settled--> SETTLED
//! ```
//!
//! SETTLED is terminal: further settlement calls fail with `AlreadySettled`.
//! Reopening requires creating a new obligation.

use crate::core::obligation_store::ObligationStore;
use crate::types::{LedgerError, Obligation, ObligationId};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Applies partial and full settlements against the obligation store
///
/// Borrows the store; owns no state of its own.
pub struct SettlementEngine<'s> {
    store: &'s ObligationStore,
}

impl<'s> SettlementEngine<'s> {
    /// Create a settlement engine over the given store
    pub fn new(store: &'s ObligationStore) -> Self {
        Self { store }
    }

    /// Apply a partial settlement to an obligation
    ///
    /// Adds `amount` to the accumulated settlement. If the new total reaches
    /// the face value the obligation transitions to the terminal settled
    /// state; `settled_at` is deliberately left untouched, since that field
    /// records only explicit manual full settlements.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `amount` is not strictly positive
    /// - `ObligationNotFound` for an unknown id
    /// - `AlreadySettled` if the obligation is already terminal
    /// - `Overpayment` if `amount` exceeds the remaining balance — strict,
    ///   never clamped, and the obligation is left unchanged
    pub fn apply_partial(
        &self,
        id: ObligationId,
        amount: Decimal,
    ) -> Result<Obligation, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument("amount", "must be positive"));
        }

        self.store.update_with(id, |obligation| {
            if obligation.is_settled {
                return Err(LedgerError::already_settled(id));
            }
            let remaining = obligation.remaining();
            if amount > remaining {
                return Err(LedgerError::overpayment(id, remaining, amount));
            }
            obligation.settled_amount += amount;
            obligation.is_settled = obligation.settled_amount >= obligation.amount;
            Ok(())
        })
    }

    /// Mark an obligation fully settled without tracking partial history
    ///
    /// Administrative shortcut equivalent to settling the entire remainder in
    /// one step, additionally recording `settled_at`. Used by the manual-edit
    /// workflow where the operator knows the obligation is paid off but does
    /// not care about the exact partial breakdown.
    ///
    /// # Errors
    ///
    /// - `ObligationNotFound` for an unknown id
    /// - `AlreadySettled` if the obligation is already terminal
    pub fn mark_fully_settled(
        &self,
        id: ObligationId,
        settled_at: NaiveDate,
    ) -> Result<Obligation, LedgerError> {
        self.store.update_with(id, |obligation| {
            if obligation.is_settled {
                return Err(LedgerError::already_settled(id));
            }
            obligation.settled_amount = obligation.amount;
            obligation.is_settled = true;
            obligation.settled_at = Some(settled_at);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewObligation, ObligationKind};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_obligation(amount: i64) -> (ObligationStore, ObligationId) {
        let store = ObligationStore::new();
        let ob = store.create(
            NewObligation {
                customer_id: Uuid::new_v4(),
                amount: Decimal::new(amount, 2),
                kind: ObligationKind::Receivable,
                due_at: date(2025, 6, 1),
                description: None,
            },
            "Acme".to_string(),
        );
        (store, ob.id)
    }

    #[test]
    fn test_partial_then_final_settlement() {
        // 1000 = 400 + 600
        let (store, id) = store_with_obligation(100000);
        let engine = SettlementEngine::new(&store);

        let after_first = engine.apply_partial(id, Decimal::new(40000, 2)).unwrap();
        assert_eq!(after_first.settled_amount, Decimal::new(40000, 2));
        assert!(!after_first.is_settled);

        let after_second = engine.apply_partial(id, Decimal::new(60000, 2)).unwrap();
        assert_eq!(after_second.settled_amount, Decimal::new(100000, 2));
        assert!(after_second.is_settled);
        // Full settlement through partials does not record a manual date.
        assert_eq!(after_second.settled_at, None);

        let result = engine.apply_partial(id, Decimal::new(100, 2));
        assert!(matches!(result, Err(LedgerError::AlreadySettled { .. })));
    }

    #[test]
    fn test_overpayment_is_rejected_and_leaves_state_unchanged() {
        // 500 face value, 600 attempted
        let (store, id) = store_with_obligation(50000);
        let engine = SettlementEngine::new(&store);

        let result = engine.apply_partial(id, Decimal::new(60000, 2));
        assert!(matches!(
            result,
            Err(LedgerError::Overpayment { remaining, requested, .. })
                if remaining == Decimal::new(50000, 2) && requested == Decimal::new(60000, 2)
        ));

        let ob = store.get(id).unwrap();
        assert_eq!(ob.settled_amount, Decimal::ZERO);
        assert!(!ob.is_settled);
    }

    #[test]
    fn test_overpayment_against_remainder_not_face_value() {
        let (store, id) = store_with_obligation(100000);
        let engine = SettlementEngine::new(&store);

        engine.apply_partial(id, Decimal::new(70000, 2)).unwrap();

        // 400 > 300 remaining, even though 400 < 1000 face value.
        let result = engine.apply_partial(id, Decimal::new(40000, 2));
        assert!(matches!(
            result,
            Err(LedgerError::Overpayment { remaining, .. })
                if remaining == Decimal::new(30000, 2)
        ));
        assert_eq!(store.get(id).unwrap().settled_amount, Decimal::new(70000, 2));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let (store, id) = store_with_obligation(100000);
        let engine = SettlementEngine::new(&store);

        for amount in [Decimal::ZERO, Decimal::new(-100, 2)] {
            let result = engine.apply_partial(id, amount);
            assert!(matches!(result, Err(LedgerError::InvalidArgument { .. })));
        }
        assert_eq!(store.get(id).unwrap().settled_amount, Decimal::ZERO);
    }

    #[test]
    fn test_mark_fully_settled_settles_remainder_and_records_date() {
        let (store, id) = store_with_obligation(100000);
        let engine = SettlementEngine::new(&store);

        engine.apply_partial(id, Decimal::new(25000, 2)).unwrap();
        let settled = engine.mark_fully_settled(id, date(2025, 6, 15)).unwrap();

        assert!(settled.is_settled);
        assert_eq!(settled.settled_amount, settled.amount);
        assert_eq!(settled.settled_at, Some(date(2025, 6, 15)));

        let result = engine.mark_fully_settled(id, date(2025, 6, 16));
        assert!(matches!(result, Err(LedgerError::AlreadySettled { .. })));
    }

    #[test]
    fn test_settlement_on_unknown_obligation() {
        let store = ObligationStore::new();
        let engine = SettlementEngine::new(&store);

        let result = engine.apply_partial(Uuid::new_v4(), Decimal::ONE);
        assert!(matches!(
            result,
            Err(LedgerError::ObligationNotFound { .. })
        ));
    }

    // Concurrency: many threads settling the same obligation must serialize
    // under the entry lock; the accumulated total can never exceed the face
    // value no matter how the settlements interleave.
    #[test]
    fn test_concurrent_settlements_never_exceed_face_value() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(ObligationStore::new());
        let ob = store.create(
            NewObligation {
                customer_id: Uuid::new_v4(),
                amount: Decimal::new(100000, 2), // 1000.00
                kind: ObligationKind::Receivable,
                due_at: date(2025, 6, 1),
                description: None,
            },
            "Acme".to_string(),
        );

        // 20 threads each try to settle 100.00; only 10 can succeed.
        let mut handles = vec![];
        for _ in 0..20 {
            let store = Arc::clone(&store);
            let id = ob.id;
            handles.push(thread::spawn(move || {
                let engine = SettlementEngine::new(&store);
                engine.apply_partial(id, Decimal::new(10000, 2)).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 10);

        let final_state = store.get(ob.id).unwrap();
        assert_eq!(final_state.settled_amount, Decimal::new(100000, 2));
        assert_eq!(final_state.settled_amount, final_state.amount);
        assert!(final_state.is_settled);
    }
}
