//! Error types for the ledger engine
//!
//! This module defines all error types that can occur while mutating or
//! querying the ledger. Errors are designed to be descriptive enough to back
//! a user-facing message at the request boundary.
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed, missing, or non-positive input
//! - **Lookup Errors**: unknown customer, obligation, or cash entry ids
//! - **Settlement Errors**: overpayment attempts, settlement of a terminal obligation
//! - **Concurrency Errors**: optimistic version conflicts (caller should retry)
//! - **I/O Errors**: file and CSV problems in the replay/export plumbing

use crate::types::{CashEntryId, CustomerId, ObligationId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger engine
///
/// Every variant is local and recoverable; none is fatal to the process.
/// No operation retries automatically — in particular, a caller receiving
/// [`LedgerError::Conflict`] is expected to re-read state and decide whether
/// the retried mutation still makes sense.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A request field failed validation
    ///
    /// Raised before any store is touched, so a rejected request never leaves
    /// partial state behind.
    #[error("Invalid {field}: {message}")]
    InvalidArgument {
        /// Name of the offending request field
        field: String,
        /// Description of the violation
        message: String,
    },

    /// The referenced customer does not exist in the registry
    #[error("Customer {id} not found")]
    CustomerNotFound {
        /// The unknown customer id
        id: CustomerId,
    },

    /// The referenced obligation does not exist
    #[error("Obligation {id} not found")]
    ObligationNotFound {
        /// The unknown obligation id
        id: ObligationId,
    },

    /// The referenced cash entry does not exist
    #[error("Cash entry {id} not found")]
    CashEntryNotFound {
        /// The unknown cash entry id
        id: CashEntryId,
    },

    /// A settlement would exceed the obligation's remaining balance
    ///
    /// The engine never clamps a settlement down to the remainder; operator
    /// error is surfaced instead of masked. The obligation is left unchanged.
    #[error("Settlement of {requested} exceeds remaining balance {remaining} on obligation {obligation}")]
    Overpayment {
        /// The obligation being settled
        obligation: ObligationId,
        /// Remaining balance before the rejected settlement
        remaining: Decimal,
        /// The rejected settlement amount
        requested: Decimal,
    },

    /// A settlement was attempted against a fully settled obligation
    ///
    /// Settled is a terminal state; reopening requires a new obligation.
    #[error("Obligation {obligation} is already settled")]
    AlreadySettled {
        /// The terminal obligation
        obligation: ObligationId,
    },

    /// An optimistic update lost a race with a concurrent writer
    ///
    /// The caller should re-read the obligation and re-derive the update from
    /// fresh state rather than blindly resubmit.
    #[error("Version conflict on obligation {obligation}: expected {expected_version}, found {actual_version}")]
    Conflict {
        /// The contended obligation
        obligation: ObligationId,
        /// Version the caller based its update on
        expected_version: u64,
        /// Version actually found in the store
        actual_version: u64,
    },

    /// I/O error while reading an operations file or writing a report
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error in the replay plumbing
    ///
    /// Recoverable — the malformed row is skipped and replay continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors, mirroring the variant fields.

impl LedgerError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create a CustomerNotFound error
    pub fn customer_not_found(id: CustomerId) -> Self {
        LedgerError::CustomerNotFound { id }
    }

    /// Create an ObligationNotFound error
    pub fn obligation_not_found(id: ObligationId) -> Self {
        LedgerError::ObligationNotFound { id }
    }

    /// Create a CashEntryNotFound error
    pub fn cash_entry_not_found(id: CashEntryId) -> Self {
        LedgerError::CashEntryNotFound { id }
    }

    /// Create an Overpayment error
    pub fn overpayment(obligation: ObligationId, remaining: Decimal, requested: Decimal) -> Self {
        LedgerError::Overpayment {
            obligation,
            remaining,
            requested,
        }
    }

    /// Create an AlreadySettled error
    pub fn already_settled(obligation: ObligationId) -> Self {
        LedgerError::AlreadySettled { obligation }
    }

    /// Create a Conflict error
    pub fn conflict(obligation: ObligationId, expected_version: u64, actual_version: u64) -> Self {
        LedgerError::Conflict {
            obligation,
            expected_version,
            actual_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case::invalid_argument(
        LedgerError::invalid_argument("amount", "must be positive"),
        "Invalid amount: must be positive"
    )]
    #[case::customer_not_found(
        LedgerError::customer_not_found(Uuid::nil()),
        "Customer 00000000-0000-0000-0000-000000000000 not found"
    )]
    #[case::obligation_not_found(
        LedgerError::obligation_not_found(Uuid::nil()),
        "Obligation 00000000-0000-0000-0000-000000000000 not found"
    )]
    #[case::overpayment(
        LedgerError::overpayment(Uuid::nil(), Decimal::new(10000, 2), Decimal::new(15000, 2)),
        "Settlement of 150.00 exceeds remaining balance 100.00 on obligation 00000000-0000-0000-0000-000000000000"
    )]
    #[case::already_settled(
        LedgerError::already_settled(Uuid::nil()),
        "Obligation 00000000-0000-0000-0000-000000000000 is already settled"
    )]
    #[case::conflict(
        LedgerError::conflict(Uuid::nil(), 3, 4),
        "Version conflict on obligation 00000000-0000-0000-0000-000000000000: expected 3, found 4"
    )]
    #[case::parse_with_line(
        LedgerError::Parse { line: Some(42), message: "bad field".to_string() },
        "CSV parse error at line 42: bad field"
    )]
    #[case::parse_without_line(
        LedgerError::Parse { line: None, message: "bad field".to_string() },
        "CSV parse error: bad field"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
