//! Customer registry types
//!
//! Customers are identity and contact data only. The ledger engine treats a
//! customer id as an opaque foreign key; the registry carries no invariants
//! beyond a required non-empty name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer identifier (engine-assigned, v4)
pub type CustomerId = Uuid;

/// Identity and contact data for a customer
///
/// Identity (`id`, `created_at`) is immutable; contact fields are mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier, engine-assigned
    pub id: CustomerId,

    /// Display name; required, non-empty
    pub name: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional postal address
    pub address: Option<String>,

    /// Optional tax identification number
    pub tax_number: Option<String>,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// Creation timestamp, engine-assigned, immutable
    pub created_at: DateTime<Utc>,

    /// Store-assigned creation sequence number
    pub seq: u64,
}
