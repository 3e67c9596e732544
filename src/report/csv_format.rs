//! CSV serialization for reports
//!
//! Centralizes the tabular export format: one writer function per report
//! kind, all pure over already-extracted rows so the row set and order are
//! decided before any I/O happens.

use crate::types::{CashEntry, Customer, DashboardStats, Obligation};
use csv::Writer;
use std::io::Write;

use crate::types::LedgerError;

/// Write customer rows with columns: id, name, phone, address, tax_number, notes
pub fn write_customers_csv(
    customers: &[Customer],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["id", "name", "phone", "address", "tax_number", "notes"])?;

    for customer in customers {
        writer.write_record(&[
            customer.id.to_string(),
            customer.name.clone(),
            customer.phone.clone().unwrap_or_default(),
            customer.address.clone().unwrap_or_default(),
            customer.tax_number.clone().unwrap_or_default(),
            customer.notes.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write obligation rows with columns: id, customer, amount, kind,
/// settled_amount, settled, due_at, description
pub fn write_obligations_csv(
    obligations: &[Obligation],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record([
        "id",
        "customer",
        "amount",
        "kind",
        "settled_amount",
        "settled",
        "due_at",
        "description",
    ])?;

    for obligation in obligations {
        writer.write_record(&[
            obligation.id.to_string(),
            obligation.customer_name.clone(),
            obligation.amount.to_string(),
            obligation.kind.as_str().to_string(),
            obligation.settled_amount.to_string(),
            obligation.is_settled.to_string(),
            obligation.due_at.to_string(),
            obligation.description.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write cash rows with columns: id, kind, method, amount, description, occurred_at
pub fn write_cash_csv(entries: &[CashEntry], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["id", "kind", "method", "amount", "description", "occurred_at"])?;

    for entry in entries {
        writer.write_record(&[
            entry.id.to_string(),
            entry.kind.as_str().to_string(),
            entry.method.as_str().to_string(),
            entry.amount.to_string(),
            entry.description.clone(),
            entry.occurred_at.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write dashboard totals as a two-column metric/value sheet
pub fn write_summary_csv(stats: &DashboardStats, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["metric", "value"])?;
    writer.write_record(["total_receivable", &stats.total_receivable.to_string()])?;
    writer.write_record(["total_payable", &stats.total_payable.to_string()])?;
    writer.write_record(["total_customers", &stats.total_customers.to_string()])?;
    writer.write_record(["cash_balance", &stats.cash_balance.to_string()])?;
    writer.write_record(["pos_balance", &stats.pos_balance.to_string()])?;
    writer.write_record(["total_balance", &stats.total_balance.to_string()])?;
    writer.write_record(["net_position", &stats.net_position.to_string()])?;

    writer.flush()?;
    Ok(())
}
