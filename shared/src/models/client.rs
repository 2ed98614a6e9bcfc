//! Client Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::invoice::Invoice;

/// Coaching engagement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Paused,
    Completed,
}

/// How the client is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Monthly,
    PerSession,
    Package,
}

/// Billing block embedded in a client
///
/// `total_paid` and `total_due` are derived from `invoices` and are never
/// independently authoritative. The store recomputes them inside the same
/// critical section as every invoice write; [`Billing::recompute_totals`]
/// is the single place the rule lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub hourly_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_price: Option<Decimal>,
    pub payment_method: PaymentMethod,
    pub invoices: Vec<Invoice>,
    /// Σ invoice amounts where status == paid (derived)
    pub total_paid: Decimal,
    /// Σ invoice amounts where status ∉ {paid, cancelled} (derived)
    pub total_due: Decimal,
}

impl Billing {
    /// Recompute `total_paid` / `total_due` from the invoice list.
    ///
    /// Idempotent: calling it twice on the same invoice list yields
    /// identical totals.
    pub fn recompute_totals(&mut self) {
        let mut paid = Decimal::ZERO;
        let mut due = Decimal::ZERO;
        for invoice in &self.invoices {
            if invoice.status == super::invoice::InvoiceStatus::Paid {
                paid += invoice.amount;
            } else if invoice.status.counts_as_due() {
                due += invoice.amount;
            }
        }
        self.total_paid = paid;
        self.total_due = due;
    }
}

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub status: ClientStatus,
    pub tags: Vec<String>,
    /// Display string, not a machine-parseable date; never enters temporal logic
    pub last_contact: String,
    pub starred: bool,
    pub coaching_program: String,
    /// Engagement start (`YYYY-MM-DD`); drives the new-clients window metrics
    pub start_date: String,
    pub sessions_completed: u32,
    pub total_sessions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
    pub goals: Vec<String>,
    pub progress: String,
    /// Cumulative revenue attributed to this client
    pub value: Decimal,
    /// Owning coach (references a User id)
    pub assigned_coach_id: i64,
    pub billing: Billing,
}

/// Create client payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub coaching_program: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub total_sessions: u32,
    #[serde(default)]
    pub goals: Vec<String>,
    pub assigned_coach_id: i64,
    pub hourly_rate: Decimal,
    pub package_price: Option<Decimal>,
    pub payment_method: PaymentMethod,
}

/// Update client payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<ClientStatus>,
    pub tags: Option<Vec<String>>,
    pub last_contact: Option<String>,
    pub starred: Option<bool>,
    pub coaching_program: Option<String>,
    pub start_date: Option<String>,
    pub sessions_completed: Option<u32>,
    pub total_sessions: Option<u32>,
    pub next_session: Option<String>,
    pub goals: Option<Vec<String>>,
    pub progress: Option<String>,
    pub value: Option<Decimal>,
    pub assigned_coach_id: Option<i64>,
    pub hourly_rate: Option<Decimal>,
    pub package_price: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::{Invoice, InvoiceStatus};

    fn dec(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    fn invoice(id: i64, amount: &str, status: InvoiceStatus) -> Invoice {
        Invoice {
            id,
            client_id: 1,
            invoice_number: format!("INV-2024-01-{:03}", id),
            date: "2024-01-05".to_string(),
            due_date: "2024-02-05".to_string(),
            amount: dec(amount),
            status,
            items: vec![],
            notes: None,
        }
    }

    fn billing(invoices: Vec<Invoice>) -> Billing {
        Billing {
            hourly_rate: dec("150"),
            package_price: None,
            payment_method: PaymentMethod::Monthly,
            invoices,
            total_paid: Decimal::ZERO,
            total_due: Decimal::ZERO,
        }
    }

    #[test]
    fn test_recompute_totals_paid_only() {
        let mut b = billing(vec![invoice(1, "1800", InvoiceStatus::Paid)]);
        b.recompute_totals();
        assert_eq!(b.total_paid, dec("1800"));
        assert_eq!(b.total_due, Decimal::ZERO);
    }

    #[test]
    fn test_recompute_totals_skips_cancelled() {
        let mut b = billing(vec![
            invoice(1, "500", InvoiceStatus::Sent),
            invoice(2, "300", InvoiceStatus::Cancelled),
            invoice(3, "250", InvoiceStatus::Overdue),
        ]);
        b.recompute_totals();
        assert_eq!(b.total_paid, Decimal::ZERO);
        assert_eq!(b.total_due, dec("750"));
    }

    #[test]
    fn test_recompute_totals_idempotent() {
        let mut b = billing(vec![
            invoice(1, "1800", InvoiceStatus::Paid),
            invoice(2, "500", InvoiceStatus::Sent),
        ]);
        b.recompute_totals();
        let (paid, due) = (b.total_paid, b.total_due);
        b.recompute_totals();
        assert_eq!(b.total_paid, paid);
        assert_eq!(b.total_due, due);
    }
}
