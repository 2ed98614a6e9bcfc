//! Invoice ledger view
//!
//! Flattens the per-client invoice lists into one ledger with a client
//! snapshot on every row, then applies conjunctive filters.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use shared::models::{Client, Invoice, InvoiceStatus};

use crate::utils::time::{month_key, parse_date};

/// Date range filter, month and year equality semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    ThisMonth,
    LastMonth,
    ThisYear,
}

/// One ledger row: invoice plus a snapshot of its client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub client_name: String,
    pub client_email: String,
    /// Derived: stored status is overdue, or the due date has passed while
    /// the amount still counts as due
    pub is_overdue: bool,
}

/// Conjunctive ledger filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerFilter {
    /// Case-insensitive substring over client name or invoice number
    pub search: Option<String>,
    pub status: Option<InvoiceStatus>,
    /// Exact client name match
    pub client: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

/// Flatten every client's invoices into ledger entries
pub fn flatten(clients: &[Client], today: NaiveDate) -> Vec<LedgerEntry> {
    clients
        .iter()
        .flat_map(|client| {
            client.billing.invoices.iter().map(move |invoice| LedgerEntry {
                invoice: invoice.clone(),
                client_name: client.name.clone(),
                client_email: client.email.clone(),
                is_overdue: derive_overdue(invoice, today),
            })
        })
        .collect()
}

fn derive_overdue(invoice: &Invoice, today: NaiveDate) -> bool {
    if invoice.status == InvoiceStatus::Overdue {
        return true;
    }
    if !invoice.status.counts_as_due() {
        return false;
    }
    match parse_date(&invoice.due_date) {
        Some(due) => due < today,
        None => false,
    }
}

/// Apply the filter; all present predicates must hold.
///
/// An invoice whose date string fails to parse is excluded from any date
/// range other than `all`.
pub fn apply_filter(
    entries: Vec<LedgerEntry>,
    filter: &LedgerFilter,
    today: NaiveDate,
) -> Vec<LedgerEntry> {
    let search = filter.search.as_ref().map(|s| s.to_lowercase());
    entries
        .into_iter()
        .filter(|entry| {
            if let Some(needle) = &search {
                let in_name = entry.client_name.to_lowercase().contains(needle);
                let in_number = entry.invoice.invoice_number.to_lowercase().contains(needle);
                if !in_name && !in_number {
                    return false;
                }
            }
            if let Some(status) = filter.status {
                if entry.invoice.status != status {
                    return false;
                }
            }
            if let Some(client) = &filter.client {
                if &entry.client_name != client {
                    return false;
                }
            }
            matches_date_range(&entry.invoice.date, filter.date_range, today)
        })
        .collect()
}

fn matches_date_range(date: &str, range: DateRange, today: NaiveDate) -> bool {
    if range == DateRange::All {
        return true;
    }
    let Some(parsed) = parse_date(date) else {
        return false;
    };
    match range {
        DateRange::All => true,
        DateRange::ThisMonth => month_key(parsed) == month_key(today),
        DateRange::LastMonth => {
            let previous = if today.month() == 1 {
                (today.year() - 1, 12)
            } else {
                (today.year(), today.month() - 1)
            };
            month_key(parsed) == previous
        }
        DateRange::ThisYear => parsed.year() == today.year(),
    }
}
