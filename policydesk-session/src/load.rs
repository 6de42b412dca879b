use futures::future::join_all;
use policydesk_client::{ClientResult, EntityBackend};
use policydesk_model::{EntityKey, Record};
use tracing::debug;

/// A list + reference load issued for one entity.
///
/// Holds no borrow of the session, so it can be run on another task while
/// the session keeps handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub(crate) key: EntityKey,
    pub(crate) generation: u64,
    pub(crate) endpoint: String,
    pub(crate) reference_endpoints: Vec<String>,
}

impl LoadRequest {
    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn reference_endpoints(&self) -> &[String] {
        &self.reference_endpoints
    }

    /// Fetches the active list and every reference collection concurrently.
    pub async fn run(self, backend: &dyn EntityBackend) -> LoadOutcome {
        debug!(
            "loading {} (generation {}) with references {:?}",
            self.endpoint, self.generation, self.reference_endpoints
        );

        let list = backend.list(&self.endpoint);
        let references = join_all(
            self.reference_endpoints
                .iter()
                .map(|endpoint| async move { (endpoint.clone(), backend.list(endpoint).await) }),
        );
        let (records, references) = tokio::join!(list, references);

        LoadOutcome {
            key: self.key,
            generation: self.generation,
            records,
            references,
        }
    }
}

/// What a [`LoadRequest`] brought back, tagged with the entity and
/// generation it was issued for.
#[derive(Debug)]
pub struct LoadOutcome {
    pub(crate) key: EntityKey,
    pub(crate) generation: u64,
    pub(crate) records: ClientResult<Vec<Record>>,
    pub(crate) references: Vec<(String, ClientResult<Vec<Record>>)>,
}

impl LoadOutcome {
    pub fn key(&self) -> EntityKey {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
