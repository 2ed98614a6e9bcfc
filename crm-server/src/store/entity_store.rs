//! Entity Store
//!
//! Typed in-memory collections behind per-collection `RwLock`s. Reads hand
//! out cloned snapshots; writes hold the lock for the whole mutation so a
//! reader never observes a half-applied change. Invoice writes and the
//! billing totals recompute share one critical section.

use chrono::NaiveDate;
use parking_lot::RwLock;

use shared::models::{
    Client, ClientCreate, ClientUpdate, Invoice, InvoiceStatus, Prospect, ProspectCreate,
    ProspectUpdate, Session, SessionCreate, SessionStatus, SessionUpdate, User, UserCreate,
    UserUpdate,
};
use shared::models::user::default_permissions;
use shared::models::{Billing, ClientStatus, PipelineStage};
use shared::util::{now_millis, snowflake_id};
use shared::{AppError, AppResult, ErrorCode};

/// Invoice mutation applied atomically with the totals recompute
#[derive(Debug, Clone)]
pub enum InvoiceMutation {
    /// Append a new invoice to the client's billing block
    Append(Invoice),
    /// Change the status of an existing invoice
    SetStatus { invoice_id: i64, status: InvoiceStatus },
}

/// Immutable snapshot of every collection, taken under the read locks.
///
/// The KPI, pipeline and ledger services are pure functions over a snapshot
/// plus an explicit reference date.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub prospects: Vec<Prospect>,
    pub sessions: Vec<Session>,
}

/// In-memory entity store
#[derive(Debug, Default)]
pub struct EntityStore {
    users: RwLock<Vec<User>>,
    clients: RwLock<Vec<Client>>,
    prospects: RwLock<Vec<Prospect>>,
    sessions: RwLock<Vec<Session>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Snapshot reads ==========

    pub fn users(&self) -> Vec<User> {
        self.users.read().clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.read().clone()
    }

    pub fn prospects(&self) -> Vec<Prospect> {
        self.prospects.read().clone()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.read().clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.users(),
            clients: self.clients(),
            prospects: self.prospects(),
            sessions: self.sessions(),
        }
    }

    // ========== Users ==========

    pub fn find_user(&self, id: i64) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    pub fn add_user(&self, payload: UserCreate) -> AppResult<User> {
        let mut users = self.users.write();
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&payload.email))
        {
            return Err(AppError::new(ErrorCode::StaffEmailExists));
        }
        let user = User {
            id: snowflake_id(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            role: payload.role,
            specialties: payload.specialties,
            is_active: true,
            created_at: now_millis(),
            last_login: None,
            permissions: default_permissions(payload.role),
        };
        users.push(user.clone());
        Ok(user)
    }

    pub fn update_user(&self, id: i64, payload: UserUpdate) -> AppResult<User> {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?;
        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = email;
        }
        if let Some(phone) = payload.phone {
            user.phone = phone;
        }
        if let Some(role) = payload.role {
            // Role change resets the permission set unless one is supplied
            if user.role != role && payload.permissions.is_none() {
                user.permissions = default_permissions(role);
            }
            user.role = role;
        }
        if let Some(specialties) = payload.specialties {
            user.specialties = specialties;
        }
        if let Some(is_active) = payload.is_active {
            user.is_active = is_active;
        }
        if let Some(permissions) = payload.permissions {
            user.permissions = permissions;
        }
        Ok(user.clone())
    }

    pub fn remove_user(&self, id: i64) -> AppResult<()> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(AppError::new(ErrorCode::StaffNotFound));
        }
        Ok(())
    }

    // ========== Clients ==========

    pub fn find_client(&self, id: i64) -> Option<Client> {
        self.clients.read().iter().find(|c| c.id == id).cloned()
    }

    pub fn add_client(&self, payload: ClientCreate, today: NaiveDate) -> Client {
        let client = Client {
            id: snowflake_id(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            company: payload.company,
            status: ClientStatus::Active,
            tags: payload.tags,
            last_contact: "À l'instant".to_string(),
            starred: false,
            coaching_program: payload.coaching_program,
            start_date: if payload.start_date.is_empty() {
                today.format("%Y-%m-%d").to_string()
            } else {
                payload.start_date
            },
            sessions_completed: 0,
            total_sessions: payload.total_sessions,
            next_session: None,
            goals: payload.goals,
            progress: String::new(),
            value: rust_decimal::Decimal::ZERO,
            assigned_coach_id: payload.assigned_coach_id,
            billing: Billing {
                hourly_rate: payload.hourly_rate,
                package_price: payload.package_price,
                payment_method: payload.payment_method,
                invoices: vec![],
                total_paid: rust_decimal::Decimal::ZERO,
                total_due: rust_decimal::Decimal::ZERO,
            },
        };
        self.clients.write().push(client.clone());
        client
    }

    pub fn update_client(&self, id: i64, payload: ClientUpdate) -> AppResult<Client> {
        let mut clients = self.clients.write();
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
        if let Some(name) = payload.name {
            client.name = name;
        }
        if let Some(email) = payload.email {
            client.email = email;
        }
        if let Some(phone) = payload.phone {
            client.phone = phone;
        }
        if payload.company.is_some() {
            client.company = payload.company;
        }
        if let Some(status) = payload.status {
            client.status = status;
        }
        if let Some(tags) = payload.tags {
            client.tags = tags;
        }
        if let Some(last_contact) = payload.last_contact {
            client.last_contact = last_contact;
        }
        if let Some(starred) = payload.starred {
            client.starred = starred;
        }
        if let Some(program) = payload.coaching_program {
            client.coaching_program = program;
        }
        if let Some(start_date) = payload.start_date {
            client.start_date = start_date;
        }
        if let Some(done) = payload.sessions_completed {
            client.sessions_completed = done;
        }
        if let Some(total) = payload.total_sessions {
            client.total_sessions = total;
        }
        if payload.next_session.is_some() {
            client.next_session = payload.next_session;
        }
        if let Some(goals) = payload.goals {
            client.goals = goals;
        }
        if let Some(progress) = payload.progress {
            client.progress = progress;
        }
        if let Some(value) = payload.value {
            client.value = value;
        }
        if let Some(coach_id) = payload.assigned_coach_id {
            client.assigned_coach_id = coach_id;
        }
        if let Some(rate) = payload.hourly_rate {
            client.billing.hourly_rate = rate;
        }
        if payload.package_price.is_some() {
            client.billing.package_price = payload.package_price;
        }
        if let Some(method) = payload.payment_method {
            client.billing.payment_method = method;
        }
        Ok(client.clone())
    }

    /// Apply an invoice mutation and recompute the billing totals inside the
    /// same critical section. Totals can never drift from the invoice list.
    pub fn apply_invoice_mutation(
        &self,
        client_id: i64,
        mutation: InvoiceMutation,
    ) -> AppResult<Client> {
        let mut clients = self.clients.write();
        let client = clients
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;

        match mutation {
            InvoiceMutation::Append(invoice) => {
                client.billing.invoices.push(invoice);
            }
            InvoiceMutation::SetStatus { invoice_id, status } => {
                let invoice = client
                    .billing
                    .invoices
                    .iter_mut()
                    .find(|i| i.id == invoice_id)
                    .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound))?;
                invoice.status = status;
            }
        }

        client.billing.recompute_totals();
        Ok(client.clone())
    }

    // ========== Prospects ==========

    pub fn find_prospect(&self, id: i64) -> Option<Prospect> {
        self.prospects.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn add_prospect(&self, payload: ProspectCreate) -> Prospect {
        let prospect = Prospect {
            id: snowflake_id(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            source: payload.source,
            status: PipelineStage::Lead,
            tags: payload.tags,
            last_contact: "À l'instant".to_string(),
            starred: false,
            coaching_goals: payload.coaching_goals,
            budget: payload.budget,
            timeline: payload.timeline,
            notes: payload.notes,
            assigned_coach_id: payload.assigned_coach_id,
        };
        self.prospects.write().push(prospect.clone());
        prospect
    }

    pub fn update_prospect(&self, id: i64, payload: ProspectUpdate) -> AppResult<Prospect> {
        let mut prospects = self.prospects.write();
        let prospect = prospects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProspectNotFound))?;
        if let Some(name) = payload.name {
            prospect.name = name;
        }
        if let Some(email) = payload.email {
            prospect.email = email;
        }
        if let Some(phone) = payload.phone {
            prospect.phone = phone;
        }
        if let Some(source) = payload.source {
            prospect.source = source;
        }
        if let Some(status) = payload.status {
            prospect.status = status;
        }
        if let Some(tags) = payload.tags {
            prospect.tags = tags;
        }
        if let Some(last_contact) = payload.last_contact {
            prospect.last_contact = last_contact;
        }
        if let Some(starred) = payload.starred {
            prospect.starred = starred;
        }
        if payload.coaching_goals.is_some() {
            prospect.coaching_goals = payload.coaching_goals;
        }
        if payload.budget.is_some() {
            prospect.budget = payload.budget;
        }
        if payload.timeline.is_some() {
            prospect.timeline = payload.timeline;
        }
        if payload.notes.is_some() {
            prospect.notes = payload.notes;
        }
        if payload.assigned_coach_id.is_some() {
            prospect.assigned_coach_id = payload.assigned_coach_id;
        }
        Ok(prospect.clone())
    }

    /// Move a prospect to another stage (kanban drag)
    pub fn set_prospect_stage(&self, id: i64, stage: PipelineStage) -> AppResult<Prospect> {
        let mut prospects = self.prospects.write();
        let prospect = prospects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::ProspectNotFound))?;
        prospect.status = stage;
        Ok(prospect.clone())
    }

    // ========== Sessions ==========

    pub fn find_session(&self, id: i64) -> Option<Session> {
        self.sessions.read().iter().find(|s| s.id == id).cloned()
    }

    pub fn add_session(&self, payload: SessionCreate) -> AppResult<Session> {
        let client = self
            .find_client(payload.client_id)
            .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
        let session = Session {
            id: snowflake_id(),
            client_id: client.id,
            client_name: client.name,
            date: payload.date,
            time: payload.time,
            duration: payload.duration,
            session_type: payload.session_type,
            status: SessionStatus::Scheduled,
            notes: payload.notes,
            objectives: None,
            outcomes: None,
            next_steps: None,
            meeting_url: None,
            assigned_coach_id: payload.assigned_coach_id.or(Some(client.assigned_coach_id)),
        };
        self.sessions.write().push(session.clone());
        Ok(session)
    }

    pub fn update_session(&self, id: i64, payload: SessionUpdate) -> AppResult<Session> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
        if let Some(date) = payload.date {
            session.date = date;
        }
        if let Some(time) = payload.time {
            session.time = time;
        }
        if let Some(duration) = payload.duration {
            session.duration = duration;
        }
        if let Some(session_type) = payload.session_type {
            session.session_type = session_type;
        }
        if let Some(status) = payload.status {
            session.status = status;
        }
        if payload.notes.is_some() {
            session.notes = payload.notes;
        }
        if payload.objectives.is_some() {
            session.objectives = payload.objectives;
        }
        if payload.outcomes.is_some() {
            session.outcomes = payload.outcomes;
        }
        if payload.next_steps.is_some() {
            session.next_steps = payload.next_steps;
        }
        if payload.meeting_url.is_some() {
            session.meeting_url = payload.meeting_url;
        }
        if payload.assigned_coach_id.is_some() {
            session.assigned_coach_id = payload.assigned_coach_id;
        }
        Ok(session.clone())
    }

    /// Clone a session one week later: same client, type, duration and
    /// meeting link; status back to scheduled, debrief fields cleared.
    pub fn schedule_next_session(&self, id: i64) -> AppResult<Session> {
        let source = self
            .find_session(id)
            .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
        let date = crate::utils::time::parse_date(&source.date)
            .ok_or_else(|| AppError::new(ErrorCode::SessionInvalidDate))?;
        let next_date = date + chrono::Duration::days(7);

        let session = Session {
            id: snowflake_id(),
            date: next_date.format("%Y-%m-%d").to_string(),
            status: SessionStatus::Scheduled,
            notes: None,
            objectives: None,
            outcomes: None,
            next_steps: None,
            ..source
        };
        self.sessions.write().push(session.clone());
        Ok(session)
    }

    // ========== Raw inserts (seed and tests) ==========

    pub fn insert_user(&self, user: User) {
        self.users.write().push(user);
    }

    pub fn insert_client(&self, mut client: Client) {
        client.billing.recompute_totals();
        self.clients.write().push(client);
    }

    pub fn insert_prospect(&self, prospect: Prospect) {
        self.prospects.write().push(prospect);
    }

    pub fn insert_session(&self, session: Session) {
        self.sessions.write().push(session);
    }
}
