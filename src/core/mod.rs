pub mod batch;
pub mod engine;
pub mod sanitizer;
pub mod upload;
pub mod validator;

pub use crate::domain::model::{BatchResult, BatchSummary, InvalidRow, ParticipantRecord, RawRecord};
pub use crate::domain::ports::{ConfigProvider, ParticipantStore};
pub use crate::utils::error::Result;
