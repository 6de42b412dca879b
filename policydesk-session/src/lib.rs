//! Editing session for PolicyDesk.
//!
//! A [`Session`] owns everything the admin screen needs: the active entity,
//! its form, the edit-vs-create mode, the loaded records and the reference
//! collections used by selectRef fields. It is the only place backend
//! failures are turned into user-facing [`Notice`]s; nothing past it ever
//! sees a transport error.
//!
//! # Loading
//!
//! Every load is split into [`Session::begin_load`], [`LoadRequest::run`]
//! and [`Session::apply_load`]. A request remembers the entity and
//! generation it was issued for, and `apply_load` drops outcomes that no
//! longer match, so a slow response for a previous entity can never land
//! in the current table. [`Session::reload`] runs all three steps.
//!
//! # Example
//!
//! ```no_run
//! use policydesk_client::{ClientConfig, HttpBackend};
//! use policydesk_model::{EntityKey, SchemaRegistry};
//! use policydesk_session::{Session, SessionConfig};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(HttpBackend::new(ClientConfig::from_env())?);
//! let mut session = Session::new(SchemaRegistry::builtin(), backend, SessionConfig::default());
//! session.switch_to(EntityKey::Plans).await;
//! session.set_field("nombre", "Gold")?;
//! session.submit().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod load;
mod notice;
mod references;
mod session;
mod view;

pub use config::{ReferencePolicy, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use load::{LoadOutcome, LoadRequest};
pub use notice::{Notice, NoticeKind};
pub use references::ReferenceCache;
pub use session::{Mode, PendingDelete, Session};
pub use view::{FieldView, FormView, InputKind, TableRow, TableView};
