//! Invoice Model

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invoice lifecycle status
///
/// The intended flow is draft → sent → paid. `overdue` is not derived from
/// `due_date` on the stored record; it is set explicitly by a user action.
/// The ledger view additionally annotates entries with a derived overdue
/// flag (see the ledger service).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Whether the amount still counts toward the client's outstanding total
    pub fn counts_as_due(&self) -> bool {
        !matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

/// A single invoice line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: i64,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Always `quantity × unit_price`
    pub total: Decimal,
}

impl InvoiceItem {
    pub fn new(id: i64, description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            quantity,
            unit_price,
            total: Decimal::from(quantity) * unit_price,
        }
    }
}

/// Invoice entity (embedded in `Client::billing`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub client_id: i64,
    /// `INV-YYYY-MM-RRR`; uniqueness is best-effort via the random suffix
    pub invoice_number: String,
    /// Issue date (`YYYY-MM-DD`)
    pub date: String,
    /// Due date (`YYYY-MM-DD`)
    pub due_date: String,
    /// Always equals the sum of `items[].total`
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub items: Vec<InvoiceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Invoice {
    /// Sum of all line totals
    pub fn compute_amount(&self) -> Decimal {
        self.items.iter().map(|item| item.total).sum()
    }
}

/// One line of a create-invoice request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemInput {
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub unit_price: Decimal,
}

/// Create invoice payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreate {
    pub client_id: i64,
    /// Due date (`YYYY-MM-DD`)
    pub due_date: String,
    /// Emptiness is rejected separately with a typed invoice error
    #[validate(nested)]
    pub items: Vec<InvoiceItemInput>,
    pub notes: Option<String>,
}

/// Generate an invoice number for the given issue date: `INV-YYYY-MM-RRR`.
///
/// The 3-digit suffix is random; collisions are possible but accepted.
pub fn generate_invoice_number(date: NaiveDate) -> String {
    use rand::Rng;
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("INV-{}-{:02}-{:03}", date.year(), date.month(), suffix)
}
