use crate::core::batch::process_batch;
use crate::core::upload::{check_upload, parse_rows, DEFAULT_MAX_UPLOAD_BYTES};
use crate::domain::model::BatchResult;
use crate::domain::ports::ParticipantStore;
use crate::utils::error::Result;

/// Drives one upload end to end: file checks, CSV parsing, batch processing
/// against already-stored identifiers, then persistence of the valid rows.
pub struct UploadOrchestrator<S: ParticipantStore> {
    store: S,
    max_upload_bytes: u64,
    dry_run: bool,
}

impl<S: ParticipantStore> UploadOrchestrator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            dry_run: false,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Validate only: skip the store entirely, no dedupe against persisted
    /// data and no insert.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn ingest(
        &self,
        filename: &str,
        mime: Option<&str>,
        bytes: &[u8],
    ) -> Result<BatchResult> {
        check_upload(filename, mime, bytes.len() as u64, self.max_upload_bytes)?;

        tracing::info!("Parsing {}", filename);
        let rows = parse_rows(bytes)?;
        tracing::info!("Parsed {} rows", rows.len());

        let existing_ids = if self.dry_run {
            None
        } else {
            let ids = self.store.fetch_existing_ids().await?;
            tracing::debug!("Fetched {} existing Yatri IDs", ids.len());
            Some(ids)
        };

        let result = process_batch(&rows, existing_ids.as_ref());
        tracing::info!(
            "Validated batch: {} valid, {} invalid ({} duplicates), rate {:.2}%",
            result.summary.valid,
            result.summary.invalid,
            result.summary.duplicates,
            result.summary.validation_rate
        );

        if !self.dry_run && !result.valid.is_empty() {
            let inserted = self.store.insert_records(&result.valid).await?;
            tracing::info!("Inserted {} records", inserted);
        }

        Ok(result)
    }
}
