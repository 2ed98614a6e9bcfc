//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::{
    Client, Invoice, InvoiceCreate, InvoiceItem, InvoiceStatus, generate_invoice_number,
};
use shared::util::snowflake_id;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentActor, in_scope, scope};
use crate::core::ServerState;
use crate::services::ledger::{LedgerEntry, LedgerFilter, apply_filter, flatten};
use crate::services::reminders::{
    ReminderTemplate, entry_data, find_template, interpolate, templates as all_templates,
};
use crate::store::InvoiceMutation;

const RESOURCE: &str = "invoice";

/// Flattened ledger over the actor's visible clients, filtered
pub async fn ledger(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(filter): Query<LedgerFilter>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    let clients = scope(&actor, state.store.clients());
    let today = state.today();
    let entries = apply_filter(flatten(&clients, today), &filter, today);
    Ok(Json(entries))
}

/// Create an invoice for a visible client
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<Client>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::InvoiceEmpty));
    }

    state
        .store
        .find_client(payload.client_id)
        .filter(|c| in_scope(&actor, c))
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;

    let today = state.today();
    let items: Vec<InvoiceItem> = payload
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            InvoiceItem::new(i as i64 + 1, item.description.clone(), item.quantity, item.unit_price)
        })
        .collect();
    let mut invoice = Invoice {
        id: snowflake_id(),
        client_id: payload.client_id,
        invoice_number: generate_invoice_number(today),
        date: today.format("%Y-%m-%d").to_string(),
        due_date: payload.due_date,
        amount: rust_decimal::Decimal::ZERO,
        status: InvoiceStatus::Draft,
        items,
        notes: payload.notes,
    };
    invoice.amount = invoice.compute_amount();

    let client = state
        .store
        .apply_invoice_mutation(payload.client_id, InvoiceMutation::Append(invoice))?;
    state.bump_version(RESOURCE);
    Ok(Json(client))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: InvoiceStatus,
}

/// Change an invoice's status; billing totals recompute atomically
pub async fn set_status(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Client>> {
    let owner = scope(&actor, state.store.clients())
        .into_iter()
        .find(|c| c.billing.invoices.iter().any(|i| i.id == id))
        .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound))?;

    let client = state.store.apply_invoice_mutation(
        owner.id,
        InvoiceMutation::SetStatus {
            invoice_id: id,
            status: payload.status,
        },
    )?;
    state.bump_version(RESOURCE);
    Ok(Json(client))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub invoice_ids: Vec<i64>,
    pub template_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResult {
    pub success_ids: Vec<i64>,
    pub failed_ids: Vec<i64>,
}

/// Send payment reminders for a batch of invoices.
///
/// Invoices outside the actor's scope, or unknown ids, land in
/// `failedIds`; an unknown template fails the whole request.
pub async fn remind(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<ReminderRequest>,
) -> AppResult<Json<ReminderResult>> {
    let template = find_template(&payload.template_id)?;

    let clients = scope(&actor, state.store.clients());
    let entries = flatten(&clients, state.today());

    let mut success_ids = Vec::new();
    let mut failed_ids = Vec::new();
    for id in payload.invoice_ids {
        let Some(entry) = entries.iter().find(|e| e.invoice.id == id) else {
            failed_ids.push(id);
            continue;
        };
        let data = entry_data(entry, &actor.name);
        let subject = interpolate(template.subject, &data);
        let body = interpolate(template.body, &data);
        match state
            .reminder_sender
            .send(&entry.client_email, &subject, &body)
            .await
        {
            Ok(()) => success_ids.push(id),
            Err(e) => {
                tracing::warn!(invoice = id, error = %e, "Reminder failed");
                failed_ids.push(id);
            }
        }
    }

    Ok(Json(ReminderResult {
        success_ids,
        failed_ids,
    }))
}

/// List the built-in reminder templates
pub async fn templates() -> Json<Vec<ReminderTemplate>> {
    Json(all_templates())
}
