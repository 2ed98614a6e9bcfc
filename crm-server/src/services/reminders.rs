//! Invoice payment reminders
//!
//! Templates with `{{placeholder}}` interpolation and a pluggable sender.
//! The default sender only logs; wiring a real mail provider means
//! implementing [`ReminderSender`] and swapping it into the server state.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use shared::{AppError, AppResult, ErrorCode};

use super::ledger::LedgerEntry;

/// A reminder email template
///
/// Supported placeholders: `{{clientName}}`, `{{invoiceNumber}}`,
/// `{{dueAmount}}`, `{{dueDate}}`, `{{coachName}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

/// The built-in template set
pub fn templates() -> Vec<ReminderTemplate> {
    vec![
        ReminderTemplate {
            id: "default",
            name: "Relance douce (par défaut)",
            subject: "Relance facture {{invoiceNumber}} : échéance dépassée",
            body: "Bonjour {{clientName}},\n\n\
Nous vous écrivons au sujet de la facture {{invoiceNumber}} d'un montant de {{dueAmount}}, échue le {{dueDate}}.\n\
Si le règlement a déjà été effectué, merci d'ignorer ce message.\n\n\
Si besoin, n'hésitez pas à répondre à cet email.\n\n\
Bien cordialement,\n\
{{coachName}}",
        },
        ReminderTemplate {
            id: "firm",
            name: "Relance ferme",
            subject: "Facture {{invoiceNumber}} impayée : merci de régulariser",
            body: "Bonjour {{clientName}},\n\n\
Sauf erreur de notre part, la facture {{invoiceNumber}} ({{dueAmount}}) reste impayée depuis le {{dueDate}}.\n\
Merci de procéder au règlement dans les meilleurs délais.\n\n\
Cordialement,\n\
{{coachName}}",
        },
    ]
}

pub fn find_template(id: &str) -> AppResult<ReminderTemplate> {
    templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::ReminderTemplateNotFound))
}

/// Replace every `{{key}}` with its value, unknown keys become empty
pub fn interpolate(text: &str, data: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = after[..close].trim();
                if let Some(value) = data.get(key) {
                    out.push_str(value);
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Placeholder data for one ledger entry
pub fn entry_data(entry: &LedgerEntry, coach_name: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("clientName", entry.client_name.clone()),
        ("invoiceNumber", entry.invoice.invoice_number.clone()),
        ("dueAmount", format!("{}€", entry.invoice.amount)),
        ("dueDate", entry.invoice.due_date.clone()),
        ("coachName", coach_name.to_string()),
    ])
}

/// Outgoing reminder channel
#[async_trait]
pub trait ReminderSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Stub sender: logs the reminder and reports success
pub struct LogReminderSender;

#[async_trait]
impl ReminderSender for LogReminderSender {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> AppResult<()> {
        tracing::info!(to, subject, "Reminder sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_fills_known_keys() {
        let data = HashMap::from([
            ("clientName", "Sophie Laurent".to_string()),
            ("invoiceNumber", "INV-2024-001".to_string()),
        ]);
        let out = interpolate("Bonjour {{clientName}}, facture {{invoiceNumber}}", &data);
        assert_eq!(out, "Bonjour Sophie Laurent, facture INV-2024-001");
    }

    #[test]
    fn test_interpolate_unknown_key_becomes_empty() {
        let data = HashMap::new();
        assert_eq!(interpolate("x{{missing}}y", &data), "xy");
    }

    #[test]
    fn test_interpolate_unclosed_braces_kept_verbatim() {
        let data = HashMap::new();
        assert_eq!(interpolate("a{{b", &data), "a{{b");
    }

    #[test]
    fn test_find_template() {
        assert!(find_template("default").is_ok());
        assert!(find_template("firm").is_ok());
        let err = find_template("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::ReminderTemplateNotFound);
    }

    #[tokio::test]
    async fn test_log_sender_succeeds() {
        let sender = LogReminderSender;
        assert!(sender
            .send("sophie.laurent@example.com", "Relance", "corps")
            .await
            .is_ok());
    }
}
