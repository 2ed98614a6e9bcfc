//! HTTP-level tests: actor middleware, admin gate, role-scoped endpoints

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crm_server::core::{Config, ResourceVersions, ServerState, server::build_app};
use crm_server::services::reminders::LogReminderSender;
use crm_server::store::EntityStore;
use crm_server::store::seed::load_demo_data;

fn test_app() -> Router {
    let config = Config {
        http_port: 0,
        environment: "development".into(),
        log_level: "info".into(),
        log_dir: None,
        timezone: chrono_tz::Europe::Paris,
        seed_demo_data: true,
        request_timeout_ms: 30000,
    };
    let store = Arc::new(EntityStore::new());
    load_demo_data(&store);
    let state = ServerState::new(
        Arc::new(config),
        store,
        Arc::new(LogReminderSender),
        Arc::new(ResourceVersions::new()),
    );
    build_app(state)
}

fn get(uri: &str, actor: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = actor {
        builder = builder.header("x-actor-id", id);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let response = test_app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_actor_header_is_401() {
    let response = test_app()
        .oneshot(get("/api/clients", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_actor_is_401() {
    let response = test_app()
        .oneshot(get("/api/clients", Some("999")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn coach_sees_only_own_clients() {
    let response = test_app()
        .oneshot(get("/api/clients", Some("2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let clients = body.as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Thomas Rousseau");
}

#[tokio::test]
async fn admin_sees_all_clients() {
    let response = test_app()
        .oneshot(get("/api/clients", Some("1")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn out_of_scope_client_fetch_is_404() {
    // Sophie Laurent belongs to coach 1; coach 2 gets a plain not-found
    let response = test_app()
        .oneshot(get("/api/clients/1", Some("2")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_mutation_requires_admin() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/staff")
        .header("x-actor-id", "2")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"name":"New Coach","email":"new@coachcrm.com","phone":"","role":"COACH"}"#,
        ))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["code"], 2002);
}

#[tokio::test]
async fn admin_can_create_staff() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/staff")
        .header("x-actor-id", "1")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"name":"New Coach","email":"new@coachcrm.com","phone":"","role":"coach"}"#,
        ))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // Role casing normalizes to uppercase, permissions default from role
    assert_eq!(body["role"], "COACH");
    assert_eq!(body["permissions"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn kpi_banner_per_page() {
    let response = test_app()
        .oneshot(get("/api/kpis?page=pipeline", Some("1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let kpis = body.as_array().unwrap();
    assert_eq!(kpis.len(), 4);
    assert_eq!(kpis[0]["label"], "Total Prospects");
    // Seed has two prospects, both non-terminal
    assert_eq!(kpis[0]["value"], "2");
    assert_eq!(kpis[1]["value"], "2");
}

#[tokio::test]
async fn pipeline_board_has_seven_ordered_buckets() {
    let response = test_app()
        .oneshot(get("/api/pipeline", Some("1")))
        .await
        .unwrap();
    let body = json_body(response).await;
    let buckets = body.as_array().unwrap();
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[0]["stage"], "lead");
    assert_eq!(buckets[2]["stage"], "meeting_scheduled");
    assert_eq!(buckets[2]["count"], 1);
    assert_eq!(buckets[6]["stage"], "closed_lost");
}

#[tokio::test]
async fn ledger_filters_by_search() {
    let response = test_app()
        .oneshot(get("/api/invoices?search=sophie", Some("1")))
        .await
        .unwrap();
    let body = json_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["invoiceNumber"], "INV-2024-001");
    assert_eq!(entries[0]["clientName"], "Sophie Laurent");
}

#[tokio::test]
async fn invoice_without_items_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/invoices")
        .header("x-actor-id", "1")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"clientId":1,"dueDate":"2024-07-01","items":[]}"#,
        ))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn remind_with_unknown_template_is_404() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/invoices/remind")
        .header("x-actor-id", "1")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"invoiceIds":[1],"templateId":"nope"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remind_reports_success_and_failures() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/invoices/remind")
        .header("x-actor-id", "1")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"invoiceIds":[1,999],"templateId":"default"}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["successIds"], serde_json::json!([1]));
    assert_eq!(body["failedIds"], serde_json::json!([999]));
}

#[tokio::test]
async fn contact_lookup_is_tagged() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(get("/api/contacts/1", Some("1")))
        .await
        .unwrap();
    let body = json_body(response).await;
    // Clients win over prospects on id clashes
    assert_eq!(body["kind"], "client");
    assert_eq!(body["name"], "Sophie Laurent");

    let response = app
        .oneshot(get("/api/contacts/12345", Some("1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_update_round_trips_slide_over_fields() {
    let app = test_app();
    let request = Request::builder()
        .method("PUT")
        .uri("/api/sessions/1")
        .header("x-actor-id", "1")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"meetingUrl":"https://meet.example.com/s1","nextSteps":"Envoyer le récap"}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["meetingUrl"], "https://meet.example.com/s1");
    assert_eq!(body["nextSteps"], "Envoyer le récap");

    // The patch persists on a subsequent fetch
    let response = app
        .oneshot(get("/api/sessions/1", Some("1")))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["meetingUrl"], "https://meet.example.com/s1");
    assert_eq!(body["objectives"][0], "Travailler sur la confiance en réunion");
}

#[tokio::test]
async fn next_session_is_cloned_one_week_later() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/sessions/1/next")
        .header("x-actor-id", "1")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    // Seed session 1 is on 2024-01-25
    assert_eq!(body["date"], "2024-02-01");
    assert_eq!(body["type"], "individual");
    assert_eq!(body["status"], "scheduled");
}
