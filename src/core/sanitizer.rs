use crate::domain::model::{ParticipantRecord, RawRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn html_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Strip HTML-tag shapes and surrounding whitespace from a free-text value.
pub(crate) fn clean_text(value: &str) -> String {
    html_tag_re().replace_all(value, "").trim().to_string()
}

// Date formats commonly seen in spreadsheet exports. ISO first, then the
// day-first forms used by the registration sheets, then month-first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y"];

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    // A bare date is accepted as midnight UTC
    parse_date(value)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn clean_field(field: &Option<String>) -> Option<String> {
    field.as_deref().map(clean_text)
}

fn date_field(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .and_then(parse_date)
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn timestamp_field(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .and_then(parse_timestamp)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn amount_field(field: &Option<String>) -> Option<f64> {
    field
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| *n >= 0.0)
}

/// Normalize a raw row into its canonical persisted shape. Best-effort and
/// total: unparseable dates and negative or malformed amounts are dropped
/// silently, rejecting such rows is the validator's job.
pub fn sanitize(record: &RawRecord) -> ParticipantRecord {
    ParticipantRecord {
        yatri_id: clean_field(&record.yatri_id),
        yatri_type: clean_field(&record.yatri_type),
        first_name: clean_field(&record.first_name),
        last_name: clean_field(&record.last_name),
        email: clean_field(&record.email),
        dial_code: clean_field(&record.dial_code),
        contact_number: clean_field(&record.contact_number),
        date_of_birth: date_field(&record.date_of_birth),
        gender: clean_field(&record.gender).map(|g| g.to_lowercase()),
        address: clean_field(&record.address),
        country: clean_field(&record.country),
        state: clean_field(&record.state),
        district: clean_field(&record.district),
        education: clean_field(&record.education),
        status: clean_field(&record.status),
        institute: clean_field(&record.institute),
        area_of_interest: clean_field(&record.area_of_interest),
        area_of_interest_2: clean_field(&record.area_of_interest_2),
        profile: clean_field(&record.profile),
        payment_id: clean_field(&record.payment_id),
        designation: clean_field(&record.designation),
        source: clean_field(&record.source),
        selected_date: date_field(&record.selected_date),
        payment_date: date_field(&record.payment_date),
        application_submitted_on: timestamp_field(&record.application_submitted_on),
        yatri_annual_income: amount_field(&record.yatri_annual_income),
        scholarship_total_amount_paid: amount_field(&record.scholarship_total_amount_paid),
        extra: record.extra.clone(),
    }
}
