use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed CSV row, before any sanitization or validation. Every field is
/// optional and carries whatever the spreadsheet export produced; columns the
/// parser does not recognize land in `extra` keyed by their original header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub yatri_id: Option<String>,
    pub yatri_type: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub dial_code: Option<String>,
    pub contact_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub education: Option<String>,
    pub status: Option<String>,
    pub institute: Option<String>,
    pub area_of_interest: Option<String>,
    pub area_of_interest_2: Option<String>,
    pub profile: Option<String>,
    pub payment_id: Option<String>,
    pub designation: Option<String>,
    pub source: Option<String>,
    pub selected_date: Option<String>,
    pub payment_date: Option<String>,
    pub application_submitted_on: Option<String>,
    pub yatri_annual_income: Option<String>,
    pub scholarship_total_amount_paid: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// Canonical sanitized participant shape, the form that gets persisted.
/// Strings are trimmed and de-tagged, dates normalized to `YYYY-MM-DD`, the
/// submission timestamp to RFC 3339, amounts parsed to non-negative numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yatri_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yatri_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_of_interest_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_submitted_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yatri_annual_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_total_amount_paid: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

/// A rejected row: 1-based position in the upload, the raw row as parsed, and
/// every reason collected for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidRow {
    pub row: usize,
    pub record: RawRecord,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
    /// Percentage of valid rows, rounded to two decimals. 0 for an empty batch.
    pub validation_rate: f64,
}

/// Outcome of processing one upload's worth of rows. `invalid` preserves input
/// order, with duplicate rejections and validation rejections interleaved
/// exactly as encountered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub valid: Vec<ParticipantRecord>,
    pub invalid: Vec<InvalidRow>,
    pub summary: BatchSummary,
}
