//! Demo dataset
//!
//! Small fixed dataset loaded at startup when `SEED_DEMO_DATA=true`. Ids are
//! stable so the demo actors (`X-Actor-Id: 1` admin, `2` coach) are easy to
//! use from a REST client.

use rust_decimal::Decimal;

use shared::models::user::default_permissions;
use shared::models::{
    Billing, Client, ClientStatus, Invoice, InvoiceItem, InvoiceStatus, PaymentMethod,
    PipelineStage, Prospect, Role, Session, SessionStatus, SessionType, User,
};

use super::EntityStore;

fn dec(v: &str) -> Decimal {
    v.parse().unwrap_or_default()
}

pub fn load_demo_data(store: &EntityStore) {
    store.insert_user(User {
        id: 1,
        name: "Admin User".into(),
        email: "admin@coachcrm.com".into(),
        phone: "+33 6 12 34 56 78".into(),
        role: Role::Admin,
        specialties: vec!["Leadership".into(), "Management".into()],
        is_active: true,
        created_at: 1_704_067_200_000,
        last_login: None,
        permissions: default_permissions(Role::Admin),
    });
    store.insert_user(User {
        id: 2,
        name: "Coach Martin".into(),
        email: "martin@coachcrm.com".into(),
        phone: "+33 6 23 45 67 89".into(),
        role: Role::Coach,
        specialties: vec!["Confiance en soi".into(), "Communication".into()],
        is_active: true,
        created_at: 1_705_276_800_000,
        last_login: None,
        permissions: default_permissions(Role::Coach),
    });

    store.insert_client(Client {
        id: 1,
        name: "Sophie Laurent".into(),
        email: "sophie.laurent@example.com".into(),
        phone: "+33 6 12 34 56 78".into(),
        company: Some("TechCorp".into()),
        status: ClientStatus::Active,
        tags: vec!["VIP".into(), "Leadership".into()],
        last_contact: "Il y a 2 jours".into(),
        starred: true,
        coaching_program: "Leadership & Confiance - 12 séances".into(),
        start_date: "2024-01-01".into(),
        sessions_completed: 8,
        total_sessions: 12,
        next_session: Some("2024-01-25T14:00:00".into()),
        goals: vec![
            "Leadership".into(),
            "Confiance en réunion".into(),
            "Communication".into(),
        ],
        progress: "Excellents progrès, très motivée".into(),
        value: dec("1800"),
        assigned_coach_id: 1,
        billing: Billing {
            hourly_rate: dec("150"),
            package_price: Some(dec("1800")),
            payment_method: PaymentMethod::Package,
            invoices: vec![Invoice {
                id: 1,
                client_id: 1,
                invoice_number: "INV-2024-001".into(),
                date: "2024-01-01".into(),
                due_date: "2024-01-31".into(),
                amount: dec("1800"),
                status: InvoiceStatus::Paid,
                items: vec![InvoiceItem::new(
                    1,
                    "Forfait Leadership & Confiance - 12 séances",
                    1,
                    dec("1800"),
                )],
                notes: None,
            }],
            total_paid: Decimal::ZERO,
            total_due: Decimal::ZERO,
        },
    });
    store.insert_client(Client {
        id: 2,
        name: "Thomas Rousseau".into(),
        email: "thomas.rousseau@example.com".into(),
        phone: "+33 6 23 45 67 89".into(),
        company: Some("StartupXYZ".into()),
        status: ClientStatus::Active,
        tags: vec!["Reconversion".into()],
        last_contact: "Il y a 1 semaine".into(),
        starred: false,
        coaching_program: "Reconversion Professionnelle - 8 séances".into(),
        start_date: "2024-01-15".into(),
        sessions_completed: 3,
        total_sessions: 8,
        next_session: Some("2024-01-28T10:00:00".into()),
        goals: vec![
            "Reconversion".into(),
            "Clarification projet".into(),
            "Confiance".into(),
        ],
        progress: "Projet se précise, motivation en hausse".into(),
        value: dec("1200"),
        assigned_coach_id: 2,
        billing: Billing {
            hourly_rate: dec("150"),
            package_price: Some(dec("1200")),
            payment_method: PaymentMethod::Package,
            invoices: vec![Invoice {
                id: 2,
                client_id: 2,
                invoice_number: "INV-2024-002".into(),
                date: "2024-01-15".into(),
                due_date: "2024-02-15".into(),
                amount: dec("1200"),
                status: InvoiceStatus::Sent,
                items: vec![InvoiceItem::new(
                    1,
                    "Forfait Reconversion - 8 séances",
                    1,
                    dec("1200"),
                )],
                notes: None,
            }],
            total_paid: Decimal::ZERO,
            total_due: Decimal::ZERO,
        },
    });

    store.insert_prospect(Prospect {
        id: 1,
        name: "Marie Dubois".into(),
        email: "marie.dubois@example.com".into(),
        phone: "+33 6 34 56 78 90".into(),
        source: "Site web".into(),
        status: PipelineStage::MeetingScheduled,
        tags: vec!["Stress".into(), "Management".into()],
        last_contact: "Il y a 3 jours".into(),
        starred: false,
        coaching_goals: Some("Gestion du stress et amélioration du leadership".into()),
        budget: Some("150-200€/mois".into()),
        timeline: Some("6 mois".into()),
        notes: Some("Très motivée, manager dans une grande entreprise".into()),
        assigned_coach_id: Some(1),
    });
    store.insert_prospect(Prospect {
        id: 2,
        name: "Pierre Martin".into(),
        email: "pierre.martin@example.com".into(),
        phone: "+33 6 45 67 89 01".into(),
        source: "Recommandation".into(),
        status: PipelineStage::Negotiation,
        tags: vec!["Carrière".into(), "Confiance".into()],
        last_contact: "Il y a 1 jour".into(),
        starred: true,
        coaching_goals: Some("Évolution de carrière et développement personnel".into()),
        budget: Some("200-300€/mois".into()),
        timeline: Some("1 an".into()),
        notes: Some("Prospect chaud, prêt à signer".into()),
        assigned_coach_id: Some(2),
    });

    store.insert_session(Session {
        id: 1,
        client_id: 1,
        client_name: "Sophie Laurent".into(),
        date: "2024-01-25".into(),
        time: "14:00".into(),
        duration: 60,
        session_type: SessionType::Individual,
        status: SessionStatus::Scheduled,
        notes: Some("Séance sur la confiance en réunion".into()),
        objectives: Some(vec![
            "Travailler sur la confiance en réunion".into(),
            "Préparer la présentation de demain".into(),
        ]),
        outcomes: None,
        next_steps: None,
        meeting_url: None,
        assigned_coach_id: Some(1),
    });
    store.insert_session(Session {
        id: 2,
        client_id: 2,
        client_name: "Thomas Rousseau".into(),
        date: "2024-01-28".into(),
        time: "10:00".into(),
        duration: 60,
        session_type: SessionType::Individual,
        status: SessionStatus::Scheduled,
        notes: Some("Travail sur la reconversion".into()),
        objectives: None,
        outcomes: None,
        next_steps: None,
        meeting_url: None,
        assigned_coach_id: Some(2),
    });
    store.insert_session(Session {
        id: 3,
        client_id: 1,
        client_name: "Sophie Laurent".into(),
        date: "2024-01-18".into(),
        time: "14:00".into(),
        duration: 60,
        session_type: SessionType::Individual,
        status: SessionStatus::Completed,
        notes: Some("Séance sur l'assertivité".into()),
        objectives: None,
        outcomes: None,
        next_steps: None,
        meeting_url: None,
        assigned_coach_id: Some(1),
    });
}
