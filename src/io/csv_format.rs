//! Operations CSV format handling
//!
//! This module centralizes the replay input format: an operations file is a
//! CSV with columns `op,label,customer,name,kind,method,amount,date,
//! description`, one ledger operation per row. Labels are file-local handles:
//! a `customer` or `obligation` row binds its `label`, and later rows
//! reference it (`obligation` rows name a customer label, `settle` rows name
//! an obligation label). The engine assigns the real ids.
//!
//! All conversion functions are pure (no I/O) for easy testing.

use crate::types::{CashKind, CashMethod, LedgerError, ObligationKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw CSV row as deserialized from an operations file
///
/// Everything beyond `op` is optional at the CSV level; which fields are
/// required depends on the operation and is enforced during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OpRecord {
    pub op: String,
    pub label: Option<String>,
    pub customer: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub method: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

/// A parsed ledger operation from a replay file
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Register a customer and bind `label` to its id
    Customer {
        label: String,
        name: String,
        notes: Option<String>,
    },
    /// Create an obligation and bind `label` to its id
    Obligation {
        label: String,
        customer_label: String,
        kind: ObligationKind,
        amount: Decimal,
        due_at: NaiveDate,
        description: Option<String>,
    },
    /// Record a cash movement
    Cash {
        kind: CashKind,
        method: CashMethod,
        amount: Decimal,
        occurred_at: Option<NaiveDate>,
        description: String,
    },
    /// Apply a partial settlement against a labeled obligation
    Settle {
        obligation_label: String,
        amount: Decimal,
    },
    /// Mark a labeled obligation fully settled on the given date
    SettleFull {
        obligation_label: String,
        settled_at: NaiveDate,
    },
}

fn required(
    value: Option<String>,
    field: &str,
    op: &str,
) -> Result<String, LedgerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(LedgerError::Parse {
            line: None,
            message: format!("'{}' operation requires a {} field", op, field),
        }),
    }
}

fn parse_amount(value: Option<String>, op: &str) -> Result<Decimal, LedgerError> {
    let raw = required(value, "amount", op)?;
    Decimal::from_str(&raw).map_err(|_| LedgerError::Parse {
        line: None,
        message: format!("invalid amount '{}' for '{}' operation", raw, op),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| LedgerError::Parse {
        line: None,
        message: format!("invalid date '{}', expected YYYY-MM-DD", raw),
    })
}

/// Convert a raw CSV row into a typed operation
///
/// Enforces per-operation field requirements and parses enums, amounts, and
/// dates. Positivity of amounts is left to the engine's request validation,
/// so a non-positive amount in a file is rejected by the same path as any
/// other caller's.
pub fn convert_op_record(record: OpRecord) -> Result<Operation, LedgerError> {
    let op = record.op.trim().to_lowercase();
    match op.as_str() {
        "customer" => Ok(Operation::Customer {
            label: required(record.label, "label", &op)?,
            name: required(record.name, "name", &op)?,
            notes: record.description.filter(|d| !d.trim().is_empty()),
        }),
        "obligation" => Ok(Operation::Obligation {
            label: required(record.label, "label", &op)?,
            customer_label: required(record.customer, "customer", &op)?,
            kind: match required(record.kind, "kind", &op)?.as_str() {
                "receivable" => ObligationKind::Receivable,
                "payable" => ObligationKind::Payable,
                other => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid obligation kind '{}'", other),
                    })
                }
            },
            amount: parse_amount(record.amount, &op)?,
            due_at: parse_date(&required(record.date, "date", &op)?)?,
            description: record.description.filter(|d| !d.trim().is_empty()),
        }),
        "cash" => Ok(Operation::Cash {
            kind: match required(record.kind, "kind", &op)?.as_str() {
                "income" => CashKind::Income,
                "expense" => CashKind::Expense,
                other => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid cash kind '{}'", other),
                    })
                }
            },
            method: match required(record.method, "method", &op)?.as_str() {
                "cash" => CashMethod::Cash,
                "card" => CashMethod::Card,
                other => {
                    return Err(LedgerError::Parse {
                        line: None,
                        message: format!("invalid cash method '{}'", other),
                    })
                }
            },
            amount: parse_amount(record.amount, &op)?,
            occurred_at: match record.date {
                Some(raw) if !raw.trim().is_empty() => Some(parse_date(raw.trim())?),
                _ => None,
            },
            description: required(record.description, "description", &op)?,
        }),
        "settle" => Ok(Operation::Settle {
            obligation_label: required(record.label, "label", &op)?,
            amount: parse_amount(record.amount, &op)?,
        }),
        "settle-full" => Ok(Operation::SettleFull {
            obligation_label: required(record.label, "label", &op)?,
            settled_at: parse_date(&required(record.date, "date", &op)?)?,
        }),
        other => Err(LedgerError::Parse {
            line: None,
            message: format!("invalid operation '{}'", other),
        }),
    }
}
