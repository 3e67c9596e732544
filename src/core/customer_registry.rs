//! Customer registry
//!
//! Identity and contact data for customers. The registry is an external
//! collaborator from the ledger's point of view: pure keyed storage with no
//! invariants beyond a required non-empty name. The ledger consults it for
//! referential validation at obligation-creation time and for the customer
//! count on the dashboard.

use crate::types::{Customer, CustomerId, CustomerUpdate, LedgerError, NewCustomer};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Keyed customer storage
///
/// Backed by `DashMap` for fine-grained per-record locking; operations on
/// different customers never contend.
#[derive(Debug, Default)]
pub struct CustomerRegistry {
    customers: DashMap<CustomerId, Customer>,
    /// Creation-order sequence, handed out once per insert
    next_seq: AtomicU64,
}

impl CustomerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Register a new customer
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the request fails validation (blank name).
    pub fn create(&self, request: NewCustomer) -> Result<Customer, LedgerError> {
        request.validate()?;

        let customer = Customer {
            id: Uuid::new_v4(),
            name: request.name,
            phone: request.phone,
            address: request.address,
            tax_number: request.tax_number,
            notes: request.notes,
            created_at: Utc::now(),
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        };
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    /// Replace a customer's contact fields
    ///
    /// Identity (`id`, `created_at`, `seq`) is preserved.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on a blank name, `CustomerNotFound` if the
    /// id is unknown.
    pub fn update(&self, id: CustomerId, request: CustomerUpdate) -> Result<Customer, LedgerError> {
        request.validate()?;

        let mut entry = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| LedgerError::customer_not_found(id))?;
        let customer = entry.value_mut();
        customer.name = request.name;
        customer.phone = request.phone;
        customer.address = request.address;
        customer.tax_number = request.tax_number;
        customer.notes = request.notes;
        Ok(customer.clone())
    }

    /// Look up a customer by id
    pub fn get(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.customers
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::customer_not_found(id))
    }

    /// Whether the id resolves to a customer
    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    /// Remove a customer
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the id is unknown.
    pub fn delete(&self, id: CustomerId) -> Result<(), LedgerError> {
        self.customers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::customer_not_found(id))
    }

    /// All customers in creation order
    pub fn list(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by_key(|c| c.seq);
        customers
    }

    /// Number of registered customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
