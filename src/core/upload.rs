use crate::domain::model::RawRecord;
use crate::utils::error::{IngestError, Result};
use std::path::Path;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// File-level gate applied before any row is parsed. Violations are fatal for
/// the whole upload, nothing is partially processed.
pub fn check_upload(filename: &str, mime: Option<&str>, size: u64, limit: u64) -> Result<()> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    if extension.as_deref() != Some("csv") {
        return Err(IngestError::UploadRejectedError {
            reason: format!("'{}' is not a .csv file", filename),
        });
    }

    if let Some(mime) = mime {
        let mime = mime.to_ascii_lowercase();
        if !mime.contains("csv") && !mime.contains("text") {
            return Err(IngestError::UploadRejectedError {
                reason: format!("unsupported content type '{}'", mime),
            });
        }
    }

    if size > limit {
        return Err(IngestError::UploadRejectedError {
            reason: format!("file is {} bytes, limit is {} bytes", size, limit),
        });
    }

    Ok(())
}

enum ColumnTarget {
    YatriId,
    YatriType,
    FirstName,
    LastName,
    Email,
    DialCode,
    ContactNumber,
    DateOfBirth,
    Gender,
    Address,
    Country,
    State,
    District,
    Education,
    Status,
    Institute,
    AreaOfInterest,
    AreaOfInterest2,
    Profile,
    PaymentId,
    Designation,
    Source,
    SelectedDate,
    PaymentDate,
    ApplicationSubmittedOn,
    YatriAnnualIncome,
    ScholarshipTotalAmountPaid,
    /// Unrecognized column, passed through under its original header.
    Extra(String),
}

fn map_header(header: &str) -> ColumnTarget {
    let normalized = header
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match normalized.as_str() {
        "yatri id" => ColumnTarget::YatriId,
        "yatri type" => ColumnTarget::YatriType,
        "first name" => ColumnTarget::FirstName,
        "last name" => ColumnTarget::LastName,
        "email" => ColumnTarget::Email,
        "dial code" => ColumnTarget::DialCode,
        "contact number" => ColumnTarget::ContactNumber,
        "date of birth" | "dob" => ColumnTarget::DateOfBirth,
        "gender" => ColumnTarget::Gender,
        "address" => ColumnTarget::Address,
        "country" => ColumnTarget::Country,
        "state" => ColumnTarget::State,
        "district" => ColumnTarget::District,
        "education" => ColumnTarget::Education,
        "status" => ColumnTarget::Status,
        "institute" => ColumnTarget::Institute,
        "area of interest" => ColumnTarget::AreaOfInterest,
        "area of interest 2" => ColumnTarget::AreaOfInterest2,
        "profile" => ColumnTarget::Profile,
        "payment id" => ColumnTarget::PaymentId,
        "designation" => ColumnTarget::Designation,
        "source" => ColumnTarget::Source,
        "selected date" => ColumnTarget::SelectedDate,
        "payment date" => ColumnTarget::PaymentDate,
        "application submitted on" => ColumnTarget::ApplicationSubmittedOn,
        "yatri annual income" => ColumnTarget::YatriAnnualIncome,
        "scholarship total amount paid" => ColumnTarget::ScholarshipTotalAmountPaid,
        _ => ColumnTarget::Extra(header.trim().to_string()),
    }
}

fn assign(record: &mut RawRecord, target: &ColumnTarget, value: &str) {
    let value = value.to_string();
    match target {
        ColumnTarget::YatriId => record.yatri_id = Some(value),
        ColumnTarget::YatriType => record.yatri_type = Some(value),
        ColumnTarget::FirstName => record.first_name = Some(value),
        ColumnTarget::LastName => record.last_name = Some(value),
        ColumnTarget::Email => record.email = Some(value),
        ColumnTarget::DialCode => record.dial_code = Some(value),
        ColumnTarget::ContactNumber => record.contact_number = Some(value),
        ColumnTarget::DateOfBirth => record.date_of_birth = Some(value),
        ColumnTarget::Gender => record.gender = Some(value),
        ColumnTarget::Address => record.address = Some(value),
        ColumnTarget::Country => record.country = Some(value),
        ColumnTarget::State => record.state = Some(value),
        ColumnTarget::District => record.district = Some(value),
        ColumnTarget::Education => record.education = Some(value),
        ColumnTarget::Status => record.status = Some(value),
        ColumnTarget::Institute => record.institute = Some(value),
        ColumnTarget::AreaOfInterest => record.area_of_interest = Some(value),
        ColumnTarget::AreaOfInterest2 => record.area_of_interest_2 = Some(value),
        ColumnTarget::Profile => record.profile = Some(value),
        ColumnTarget::PaymentId => record.payment_id = Some(value),
        ColumnTarget::Designation => record.designation = Some(value),
        ColumnTarget::Source => record.source = Some(value),
        ColumnTarget::SelectedDate => record.selected_date = Some(value),
        ColumnTarget::PaymentDate => record.payment_date = Some(value),
        ColumnTarget::ApplicationSubmittedOn => record.application_submitted_on = Some(value),
        ColumnTarget::YatriAnnualIncome => record.yatri_annual_income = Some(value),
        ColumnTarget::ScholarshipTotalAmountPaid => {
            record.scholarship_total_amount_paid = Some(value)
        }
        ColumnTarget::Extra(header) => {
            record.extra.insert(header.clone(), value);
        }
    }
}

/// Parse CSV bytes into raw records. The header row is mapped to canonical
/// fields the way spreadsheet exports name them; blank cells are treated as
/// absent fields.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let targets: Vec<ColumnTarget> = reader.headers()?.iter().map(map_header).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let csv_row = result?;
        let mut record = RawRecord::default();
        for (index, value) in csv_row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match targets.get(index) {
                Some(target) => assign(&mut record, target, value),
                // Flexible mode allows rows longer than the header row; keep
                // the surplus cells under a positional key
                None => {
                    record
                        .extra
                        .insert(format!("column_{}", index + 1), value.to_string());
                }
            }
        }
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_upload_accepts_csv() {
        assert!(check_upload("yatris.csv", Some("text/csv"), 1024, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        assert!(check_upload("YATRIS.CSV", None, 1024, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_check_upload_rejects_wrong_extension() {
        let err = check_upload("yatris.xlsx", None, 1024, DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(err.to_string().contains("not a .csv file"));
    }

    #[test]
    fn test_check_upload_rejects_wrong_mime() {
        let err = check_upload(
            "yatris.csv",
            Some("application/pdf"),
            1024,
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported content type"));
    }

    #[test]
    fn test_check_upload_rejects_oversize() {
        let err = check_upload("yatris.csv", Some("text/csv"), 11 * 1024 * 1024, DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_parse_rows_maps_spreadsheet_headers() {
        let csv = "Yatri Id,First Name,Last Name,Email,DOB,Yatri Annual Income\n\
                   Y-1,Asha,Patil,asha@example.com,1995-08-15,350000\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].yatri_id.as_deref(), Some("Y-1"));
        assert_eq!(rows[0].first_name.as_deref(), Some("Asha"));
        assert_eq!(rows[0].date_of_birth.as_deref(), Some("1995-08-15"));
        assert_eq!(rows[0].yatri_annual_income.as_deref(), Some("350000"));
    }

    #[test]
    fn test_parse_rows_header_case_and_spacing_insensitive() {
        let csv = "YATRI ID, first  name ,Contact Number\nY-2,Ravi,+91 98765\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].yatri_id.as_deref(), Some("Y-2"));
        assert_eq!(rows[0].first_name.as_deref(), Some("Ravi"));
        assert_eq!(rows[0].contact_number.as_deref(), Some("+91 98765"));
    }

    #[test]
    fn test_parse_rows_blank_cells_become_absent() {
        let csv = "Yatri Id,First Name,Email\nY-3,,ravi@example.com\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].first_name, None);
        assert_eq!(rows[0].email.as_deref(), Some("ravi@example.com"));
    }

    #[test]
    fn test_parse_rows_unknown_columns_go_to_extra() {
        let csv = "Yatri Id,Batch Name\nY-4,JY-2024\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(
            rows[0].extra.get("Batch Name").map(String::as_str),
            Some("JY-2024")
        );
    }

    #[test]
    fn test_parse_rows_surplus_cells_kept_under_positional_keys() {
        let csv = "Yatri Id,First Name\nY-6,Asha,stray-value\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].yatri_id.as_deref(), Some("Y-6"));
        assert_eq!(
            rows[0].extra.get("column_3").map(String::as_str),
            Some("stray-value")
        );
    }

    #[test]
    fn test_parse_rows_quoted_fields() {
        let csv = "Yatri Id,Address\nY-5,\"12, MG Road, Pune\"\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].address.as_deref(), Some("12, MG Road, Pune"));
    }
}
