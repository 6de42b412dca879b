use crate::config::{ReferencePolicy, SessionConfig};
use crate::error::{SessionError, SessionResult};
use crate::load::{LoadOutcome, LoadRequest};
use crate::notice::{self, Notice};
use crate::references::ReferenceCache;
use policydesk_client::{build_payload, ClientError, EntityBackend};
use policydesk_model::{EntityKey, EntitySchema, FormState, Record, RecordId, SchemaRegistry};
use policydesk_validate::validate_form;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the form currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No edit in progress and nothing typed.
    Browsing,
    /// A record was selected; submit updates it.
    Editing,
    /// The user is filling a new record; submit creates it.
    Creating,
}

/// Proof that the user confirmed a deletion.
///
/// Only [`Session::request_delete`] creates one, and
/// [`Session::confirm_delete`] consumes it, so a removal cannot be issued
/// without going through the confirmation step.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingDelete {
    key: EntityKey,
    id: RecordId,
}

impl PendingDelete {
    pub fn entity(&self) -> EntityKey {
        self.key
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Question to put to the user before confirming.
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {} record {}?", self.key, self.id)
    }
}

/// One admin screen's worth of state, driven by user actions and completed
/// loads.
pub struct Session {
    registry: SchemaRegistry,
    backend: Arc<dyn EntityBackend>,
    config: SessionConfig,
    active: EntityKey,
    form: FormState,
    editing_id: Option<RecordId>,
    records: Vec<Record>,
    references: ReferenceCache,
    notice: Option<Notice>,
    generation: u64,
    loading: bool,
}

impl Session {
    /// Starts on the first entity with an empty form. Nothing is loaded
    /// until [`reload`](Self::reload) or [`switch_to`](Self::switch_to).
    pub fn new(
        registry: SchemaRegistry,
        backend: Arc<dyn EntityBackend>,
        config: SessionConfig,
    ) -> Self {
        let active = EntityKey::ALL[0];
        let form = FormState::empty(registry.get(active));
        Self {
            registry,
            backend,
            config,
            active,
            form,
            editing_id: None,
            records: Vec::new(),
            references: ReferenceCache::new(),
            notice: None,
            generation: 0,
            loading: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn active(&self) -> EntityKey {
        self.active
    }

    pub fn schema(&self) -> &EntitySchema {
        self.registry.get(self.active)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn references(&self) -> &ReferenceCache {
        &self.references
    }

    pub fn editing_id(&self) -> Option<&RecordId> {
        self.editing_id.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True between [`begin_load`](Self::begin_load) and the matching
    /// [`apply_load`](Self::apply_load).
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> Mode {
        if self.editing_id.is_some() {
            Mode::Editing
        } else if self.form.is_blank() {
            Mode::Browsing
        } else {
            Mode::Creating
        }
    }

    /// Display text for a stored value of `field_name`; selectRef ids are
    /// resolved to their referenced record's label.
    pub fn resolve_label(&self, field_name: &str, value: &Value) -> String {
        match self.schema().field(field_name) {
            Some(field) => self.references.resolve_label(field, value),
            None => match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            },
        }
    }

    // ── Entity switching and loading ─────────────────────────────

    /// Makes `key` the active entity. Any form in progress is discarded
    /// without prompting, then the list and references are reloaded.
    pub async fn switch_to(&mut self, key: EntityKey) {
        info!("Switching to {}", key);
        self.active = key;
        self.reset_form();
        self.records.clear();
        self.notice = None;
        self.reload().await;
    }

    /// Reloads the active list and the reference collections.
    pub async fn reload(&mut self) {
        let request = self.begin_load();
        let backend = Arc::clone(&self.backend);
        let outcome = request.run(backend.as_ref()).await;
        self.apply_load(outcome);
    }

    /// Issues a load for the active entity. Any load issued earlier is
    /// superseded: its outcome will be discarded by `apply_load`.
    pub fn begin_load(&mut self) -> LoadRequest {
        self.generation += 1;
        self.loading = true;

        let schema = self.registry.get(self.active);
        let reference_endpoints = match self.config.references {
            ReferencePolicy::All => self.registry.reference_endpoints(),
            ReferencePolicy::ActiveSchema => schema.reference_endpoints(),
        };

        LoadRequest {
            key: self.active,
            generation: self.generation,
            endpoint: schema.endpoint.clone(),
            reference_endpoints: reference_endpoints.into_iter().map(String::from).collect(),
        }
    }

    /// Applies a finished load. Returns `false` when the outcome was issued
    /// for another entity or superseded by a newer load, in which case
    /// nothing changes.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.key != self.active || outcome.generation != self.generation {
            warn!(
                "Discarding stale load for {} (generation {}, current {} generation {})",
                outcome.key, outcome.generation, self.active, self.generation
            );
            return false;
        }
        self.loading = false;

        match outcome.records {
            Ok(records) => {
                debug!("Loaded {} {} records", records.len(), self.active);
                self.records = records;
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|n| n.text == notice::BACKEND_UNREACHABLE)
                {
                    self.notice = None;
                }
            }
            Err(e) => {
                warn!("Failed to load {}: {}", self.active, e);
                self.records.clear();
                self.notice = Some(Notice::error(notice::BACKEND_UNREACHABLE));
            }
        }

        for (endpoint, result) in outcome.references {
            match result {
                Ok(records) => self.references.replace(&endpoint, records),
                Err(e) => {
                    warn!("Failed to load reference data from {}: {}", endpoint, e);
                    self.references.replace(&endpoint, Vec::new());
                }
            }
        }
        true
    }

    // ── Form editing ─────────────────────────────────────────────

    /// Records user input for one field and clears that field's error.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> SessionResult<()> {
        if self.form.set_value(name, value) {
            Ok(())
        } else {
            Err(SessionError::UnknownField {
                entity: self.active,
                field: name.to_string(),
            })
        }
    }

    /// Starts editing a record from the current list.
    pub fn edit(&mut self, id: &RecordId) -> SessionResult<()> {
        let schema = self.registry.get(self.active);
        let record = self
            .records
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| SessionError::RecordNotFound {
                entity: self.active,
                id: id.clone(),
            })?;

        self.form = FormState::from_record(schema, record);
        self.editing_id = Some(record.id.clone());
        debug!("Editing {} record {}", self.active, id);
        Ok(())
    }

    /// Abandons the current edit or draft. Issues no I/O.
    pub fn cancel(&mut self) {
        self.reset_form();
        self.notice = None;
    }

    /// Validates and persists the form.
    ///
    /// Returns `true` when the backend accepted the write. On any failure
    /// the form is left as it was so the user can correct and resubmit;
    /// the reason is in [`notice`](Self::notice) and, for validation
    /// failures, on the individual fields.
    pub async fn submit(&mut self) -> bool {
        let schema = self.registry.get(self.active);
        let validation = validate_form(schema, &self.form);
        self.form.set_errors(validation.errors());
        if !validation.is_valid() {
            debug!(
                "Rejected {} form: {:?}",
                self.active,
                validation.failed_fields().collect::<Vec<_>>()
            );
            self.notice = Some(Notice::error(notice::CORRECT_ERRORS));
            return false;
        }

        let payload = match build_payload(schema, &self.form) {
            Ok(payload) => payload,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return false;
            }
        };

        let endpoint = schema.endpoint.clone();
        let result = match &self.editing_id {
            Some(id) => self.backend.update(&endpoint, id, &payload).await,
            None => self.backend.create(&endpoint, &payload).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                let text = if self.editing_id.is_some() {
                    notice::UPDATED
                } else {
                    notice::CREATED
                };
                self.notice = Some(Notice::success(text));
                self.reset_form();
                self.reload().await;
                true
            }
            Err(e) => {
                warn!("Saving {} failed: {}", self.active, e);
                self.notice = Some(Notice::error(write_failure(&e, notice::CONNECTION_ERROR)));
                false
            }
        }
    }

    // ── Deletion ─────────────────────────────────────────────────

    /// First step of a deletion: checks the record exists and hands back
    /// the token the user must confirm.
    pub fn request_delete(&self, id: &RecordId) -> SessionResult<PendingDelete> {
        if !self.records.iter().any(|r| &r.id == id) {
            return Err(SessionError::RecordNotFound {
                entity: self.active,
                id: id.clone(),
            });
        }
        Ok(PendingDelete {
            key: self.active,
            id: id.clone(),
        })
    }

    /// Irreversibly deletes the confirmed record, then reloads.
    /// Returns `true` when the backend accepted the deletion.
    pub async fn confirm_delete(&mut self, pending: PendingDelete) -> bool {
        if pending.key != self.active {
            warn!(
                "Ignoring delete of {} record {}: active entity is now {}",
                pending.key, pending.id, self.active
            );
            return false;
        }

        let endpoint = self.schema().endpoint.clone();
        match self.backend.remove(&endpoint, &pending.id).await {
            Ok(()) => {
                if self.editing_id.as_ref() == Some(&pending.id) {
                    self.reset_form();
                }
                self.notice = Some(Notice::success(notice::DELETED));
                self.reload().await;
                true
            }
            Err(e) => {
                warn!("Deleting {} record {} failed: {}", self.active, pending.id, e);
                self.notice = Some(Notice::error(write_failure(&e, notice::DELETE_FAILED)));
                false
            }
        }
    }

    fn reset_form(&mut self) {
        self.form = FormState::empty(self.registry.get(self.active));
        self.editing_id = None;
    }
}

/// Server messages are shown verbatim; anything else gets `fallback`.
fn write_failure(error: &ClientError, fallback: &str) -> String {
    match error {
        ClientError::Api(message) => message.clone(),
        ClientError::Payload(e) => e.to_string(),
        _ => fallback.to_string(),
    }
}
