pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::RestStore;
pub use core::batch::process_batch;
pub use core::engine::UploadOrchestrator;
pub use core::sanitizer::sanitize;
pub use core::validator::{validate, ValidationOutcome};
pub use domain::model::{BatchResult, BatchSummary, InvalidRow, ParticipantRecord, RawRecord};
pub use domain::ports::{ConfigProvider, ParticipantStore};
pub use utils::error::{IngestError, Result};
