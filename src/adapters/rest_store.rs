use crate::domain::model::ParticipantRecord;
use crate::domain::ports::{ConfigProvider, ParticipantStore};
use crate::utils::error::{IngestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;

/// PostgREST-style participant store, the hosted table the dashboard writes
/// to. Exposes exactly the two operations the orchestrator needs.
pub struct RestStore {
    client: Client,
    endpoint: String,
    table: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(endpoint: impl Into<String>, table: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            table: table.into(),
            api_key,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.endpoint(),
            config.table(),
            config.api_key().map(str::to_string),
        )
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.table)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ParticipantStore for RestStore {
    async fn fetch_existing_ids(&self) -> Result<HashSet<String>> {
        let request = self
            .client
            .get(self.table_url())
            .query(&[("select", "yatri_id")]);

        let response = self.with_auth(request).send().await?;
        if !response.status().is_success() {
            return Err(IngestError::StorageError {
                message: format!(
                    "fetching existing Yatri IDs failed with status {}",
                    response.status()
                ),
            });
        }

        let rows: Vec<serde_json::Value> = response.json().await?;
        let ids = rows
            .iter()
            .filter_map(|row| row.get("yatri_id").and_then(|v| v.as_str()))
            .map(str::to_string)
            .collect();
        Ok(ids)
    }

    async fn insert_records(&self, records: &[ParticipantRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(records);

        let response = self.with_auth(request).send().await?;
        if !response.status().is_success() {
            return Err(IngestError::StorageError {
                message: format!("insert failed with status {}", response.status()),
            });
        }

        Ok(records.len())
    }
}
