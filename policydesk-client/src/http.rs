//! HTTP implementation of [`EntityBackend`].

use crate::backend::EntityBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::payload::Payload;
use async_trait::async_trait;
use policydesk_model::{Record, RecordId};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const WRITE_FAILED: &str = "Operation failed";
const DELETE_FAILED: &str = "Could not delete record";

/// Error body returned by the backend on a rejected write.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Talks to the REST backend over HTTP.
pub struct HttpBackend {
    config: ClientConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Turns a non-success response into an [`ClientError::Api`], preferring
/// the backend's own message.
async fn rejection(response: Response, fallback: &str) -> ClientError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    debug!("backend rejected request ({}): {}", status, message);
    ClientError::Api(message)
}

#[async_trait]
impl EntityBackend for HttpBackend {
    async fn list(&self, endpoint: &str) -> ClientResult<Vec<Record>> {
        let url = self.config.collection_url(endpoint);
        debug!("GET {}", url);

        // Any JSON answer counts, whatever the status; only an array holds records.
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        match response.json::<Value>().await? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Record>, _>>()
                .map_err(|e| ClientError::Decode(format!("{endpoint}: {e}"))),
            _ => {
                debug!("GET {} returned a non-array body ({}), treating as empty", url, status);
                Ok(Vec::new())
            }
        }
    }

    async fn create(&self, endpoint: &str, payload: &Payload) -> ClientResult<Option<Record>> {
        let url = self.config.collection_url(endpoint);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response, WRITE_FAILED).await);
        }

        let created = response.json::<Record>().await.ok();
        match &created {
            Some(record) => info!("Created {} record {}", endpoint, record.id),
            None => info!("Created {} record", endpoint),
        }
        Ok(created)
    }

    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Payload) -> ClientResult<()> {
        let url = self.config.item_url(endpoint, &id.to_string());
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response, WRITE_FAILED).await);
        }

        info!("Updated {} record {}", endpoint, id);
        Ok(())
    }

    async fn remove(&self, endpoint: &str, id: &RecordId) -> ClientResult<()> {
        let url = self.config.item_url(endpoint, &id.to_string());
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response, DELETE_FAILED).await);
        }

        info!("Deleted {} record {}", endpoint, id);
        Ok(())
    }
}
