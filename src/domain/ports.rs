use crate::domain::model::ParticipantRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Persistence collaborator for participant records. The core only ever asks
/// for the already-stored identifiers and hands over validated records.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn fetch_existing_ids(&self) -> Result<HashSet<String>>;
    async fn insert_records(&self, records: &[ParticipantRecord]) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn table(&self) -> &str;
    fn max_upload_bytes(&self) -> u64;
}
