//! Session driven against a mock HTTP backend.

use policydesk_client::{ClientConfig, HttpBackend};
use policydesk_model::{EntityKey, RecordId, SchemaRegistry};
use policydesk_session::{Session, SessionConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_for(server: &MockServer) -> Session {
    let backend = HttpBackend::new(ClientConfig::new(format!("{}/api", server.uri()))).unwrap();
    Session::new(
        SchemaRegistry::builtin(),
        Arc::new(backend),
        SessionConfig::default(),
    )
}

async fn mount_list(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn creates_plan_over_http() {
    let server = MockServer::start().await;
    mount_list(&server, "clientes", json!([])).await;
    mount_list(&server, "planes", json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/planes"))
        .and(body_json(json!({
            "nombre": "Premium",
            "tipo": "VIDA",
            "primaBase": 12,
            "coberturaMax": 1500.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3, "nombre": "Premium", "tipo": "VIDA", "primaBase": 12, "coberturaMax": 1500.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    session.switch_to(EntityKey::Plans).await;
    session.set_field("nombre", "Premium").unwrap();
    session.set_field("tipo", "VIDA").unwrap();
    session.set_field("primaBase", "12").unwrap();
    session.set_field("coberturaMax", "1500.5").unwrap();

    assert!(session.submit().await);
    assert_eq!(session.notice().unwrap().text, "Created successfully");
}

#[tokio::test]
async fn server_error_message_reaches_notice() {
    let server = MockServer::start().await;
    mount_list(&server, "clientes", json!([
        {"id": 4, "nombres": "Ana", "identificacion": "0102030405",
         "email": "ana@example.com", "telefono": "0991234567"}
    ]))
    .await;
    mount_list(&server, "planes", json!([])).await;
    Mock::given(method("PUT"))
        .and(path("/api/clientes/4"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "Email already registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    session.reload().await;
    session.edit(&RecordId::Int(4)).unwrap();

    assert!(!session.submit().await);
    assert_eq!(session.notice().unwrap().text, "Email already registered");
    assert_eq!(session.editing_id(), Some(&RecordId::Int(4)));
}

#[tokio::test]
async fn list_error_object_shows_empty_table_without_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;
    mount_list(&server, "planes", json!([])).await;

    let mut session = session_for(&server).await;
    session.reload().await;

    assert!(session.records().is_empty());
    assert_eq!(session.notice(), None);
}

#[tokio::test]
async fn unreadable_list_shows_backend_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    mount_list(&server, "planes", json!([])).await;

    let mut session = session_for(&server).await;
    session.reload().await;

    assert!(session.records().is_empty());
    assert_eq!(
        session.notice().unwrap().text,
        "Could not connect to the backend"
    );
}

#[tokio::test]
async fn deletes_over_http() {
    let server = MockServer::start().await;
    mount_list(&server, "clientes", json!([{"id": 1, "nombres": "Ana"}])).await;
    mount_list(&server, "planes", json!([])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/clientes/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server).await;
    session.reload().await;

    let pending = session.request_delete(&RecordId::Int(1)).unwrap();
    assert!(session.confirm_delete(pending).await);
    assert_eq!(session.notice().unwrap().text, "Deleted successfully");
}
