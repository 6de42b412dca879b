//! Shared test helpers for session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use policydesk_client::{ClientError, ClientResult, EntityBackend, Payload};
use policydesk_model::{Record, RecordId, SchemaRegistry};
use policydesk_session::{Session, SessionConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A backend call as seen by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Create(String, Payload),
    Update(String, RecordId, Payload),
    Remove(String, RecordId),
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::List(_))
    }
}

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Record>>,
    calls: Vec<Call>,
    next_id: i64,
    offline: bool,
    reject_writes: Option<String>,
    failing_lists: Vec<String>,
}

/// In-memory backend that records every call.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 100;
        backend
    }

    /// A backend preloaded with a couple of customers, plans and policies.
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.insert("clientes", customer(1, "Ana Torres"));
        backend.insert("clientes", customer(2, "Luis Vera"));
        backend.insert("planes", plan(10, "Gold", "VIDA"));
        backend.insert("planes", plan(11, "Basic", "AUTO"));
        backend.insert("polizas", policy(50, "POL-001", 1, 10));
        backend
    }

    pub fn insert(&self, endpoint: &str, record: Record) {
        self.state
            .lock()
            .unwrap()
            .collections
            .entry(endpoint.to_string())
            .or_default()
            .push(record);
    }

    pub fn records(&self, endpoint: &str) -> Vec<Record> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(endpoint)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn listed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(endpoint) => Some(endpoint),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Every call fails as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Writes are rejected with `message`, as a 4xx `{"error": ...}` would be.
    pub fn reject_writes(&self, message: Option<&str>) {
        self.state.lock().unwrap().reject_writes = message.map(str::to_string);
    }

    pub fn fail_list(&self, endpoint: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_lists
            .push(endpoint.to_string());
    }

    fn write_guard(state: &State) -> ClientResult<()> {
        if state.offline {
            return Err(ClientError::Connection("connection refused".into()));
        }
        if let Some(message) = &state.reject_writes {
            return Err(ClientError::Api(message.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityBackend for FakeBackend {
    async fn list(&self, endpoint: &str) -> ClientResult<Vec<Record>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List(endpoint.to_string()));
        if state.offline || state.failing_lists.iter().any(|e| e == endpoint) {
            return Err(ClientError::Connection("connection refused".into()));
        }
        Ok(state.collections.get(endpoint).cloned().unwrap_or_default())
    }

    async fn create(&self, endpoint: &str, payload: &Payload) -> ClientResult<Option<Record>> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Create(endpoint.to_string(), payload.clone()));
        Self::write_guard(&state)?;

        state.next_id += 1;
        let record = Record::new(state.next_id, payload.clone());
        state
            .collections
            .entry(endpoint.to_string())
            .or_default()
            .push(record.clone());
        Ok(Some(record))
    }

    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Payload) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(
            endpoint.to_string(),
            id.clone(),
            payload.clone(),
        ));
        Self::write_guard(&state)?;

        if let Some(record) = state
            .collections
            .get_mut(endpoint)
            .and_then(|records| records.iter_mut().find(|r| &r.id == id))
        {
            record.fields = payload.clone();
        }
        Ok(())
    }

    async fn remove(&self, endpoint: &str, id: &RecordId) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(Call::Remove(endpoint.to_string(), id.clone()));
        Self::write_guard(&state)?;

        if let Some(records) = state.collections.get_mut(endpoint) {
            records.retain(|r| &r.id != id);
        }
        Ok(())
    }
}

pub fn record(id: i64, fields: Value) -> Record {
    Record::new(id, fields.as_object().cloned().unwrap())
}

pub fn customer(id: i64, name: &str) -> Record {
    record(
        id,
        json!({
            "nombres": name,
            "identificacion": "0102030405",
            "email": "ana@example.com",
            "telefono": "0991234567"
        }),
    )
}

pub fn plan(id: i64, name: &str, kind: &str) -> Record {
    record(
        id,
        json!({
            "nombre": name,
            "tipo": kind,
            "primaBase": 25.5,
            "coberturaMax": 10000
        }),
    )
}

pub fn policy(id: i64, number: &str, customer_id: i64, plan_id: i64) -> Record {
    record(
        id,
        json!({
            "numeroPoliza": number,
            "fechaInicio": "2024-01-01",
            "fechaFin": "2025-01-01",
            "primaMensual": 12.5,
            "estado": "ACTIVA",
            "clienteId": customer_id,
            "planSeguroId": plan_id
        }),
    )
}

pub fn session_with(backend: &FakeBackend, config: SessionConfig) -> Session {
    Session::new(SchemaRegistry::builtin(), Arc::new(backend.clone()), config)
}

/// A session on the seeded backend with its first list already loaded.
pub async fn loaded_session(backend: &FakeBackend) -> Session {
    let mut session = session_with(backend, SessionConfig::default());
    session.reload().await;
    session
}

/// Fills the plan form with valid values.
pub fn fill_plan(session: &mut Session, name: &str) {
    session.set_field("nombre", name).unwrap();
    session.set_field("tipo", "SALUD").unwrap();
    session.set_field("primaBase", "30").unwrap();
    session.set_field("coberturaMax", "5000.75").unwrap();
}
