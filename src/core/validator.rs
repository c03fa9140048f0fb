use crate::core::sanitizer::parse_date;
use crate::domain::model::RawRecord;
use chrono::{Datelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

pub const ALLOWED_GENDERS: &[&str] = &["male", "female", "other", "prefer not to say"];

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.\S+$").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9\s+\-()]+$").unwrap())
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_amount(field: &Option<String>, message: &str, errors: &mut Vec<String>) {
    if let Some(value) = non_empty(field) {
        match value.parse::<f64>() {
            Ok(amount) if amount >= 0.0 => {}
            _ => errors.push(message.to_string()),
        }
    }
}

/// Check one raw row against the field-level rules, collecting every
/// violation rather than stopping at the first. Never fails;
/// `is_valid` holds exactly when `errors` is empty.
pub fn validate(record: &RawRecord) -> ValidationOutcome {
    let mut errors = Vec::new();

    if non_empty(&record.yatri_id).is_none() {
        errors.push("Yatri ID is required".to_string());
    }
    if non_empty(&record.first_name).is_none() {
        errors.push("First name is required".to_string());
    }
    if non_empty(&record.last_name).is_none() {
        errors.push("Last name is required".to_string());
    }

    // "Email is required" is reserved for absent/empty; any other value,
    // whitespace included, goes through the format check
    match record.email.as_deref() {
        None | Some("") => errors.push("Email is required".to_string()),
        Some(email) if !email_re().is_match(email.trim()) => {
            errors.push("Invalid email format".to_string())
        }
        _ => {}
    }

    if let Some(phone) = non_empty(&record.contact_number) {
        if !phone_re().is_match(phone) {
            errors.push("Invalid phone number format".to_string());
        }
    }

    if let Some(dob) = non_empty(&record.date_of_birth) {
        match parse_date(dob) {
            None => errors.push("Invalid date of birth".to_string()),
            Some(date) => {
                // Whole-year age, ignoring month and day. Kept as-is for
                // parity with the dashboard's historical behavior.
                let age = Utc::now().year() - date.year();
                if !(15..=100).contains(&age) {
                    errors.push("Age must be between 15 and 100 years".to_string());
                }
            }
        }
    }

    if let Some(gender) = non_empty(&record.gender) {
        if !ALLOWED_GENDERS.contains(&gender.to_lowercase().as_str()) {
            errors.push(format!(
                "Gender must be one of: {}",
                ALLOWED_GENDERS.join(", ")
            ));
        }
    }

    check_amount(
        &record.yatri_annual_income,
        "Annual income must be a positive number",
        &mut errors,
    );
    check_amount(
        &record.scholarship_total_amount_paid,
        "Scholarship amount must be a positive number",
        &mut errors,
    );

    ValidationOutcome {
        is_valid: errors.is_empty(),
        errors,
    }
}
