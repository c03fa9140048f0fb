use crate::core::sanitizer::sanitize;
use crate::core::validator::validate;
use crate::domain::model::{BatchResult, BatchSummary, InvalidRow, RawRecord};
use std::collections::HashSet;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run one upload's rows through duplicate detection, validation and
/// sanitization. `existing_ids` seeds the seen-set with identifiers already
/// persisted, so re-uploads of stored participants come back as duplicates.
///
/// Rows are processed in input order and `invalid` keeps that order, with
/// duplicate rejections and validation rejections interleaved as encountered.
/// A duplicate id skips validation entirely. Ids enter the seen-set even when
/// empty or absent; the missing-id rejection comes from the validator.
pub fn process_batch(
    records: &[RawRecord],
    existing_ids: Option<&HashSet<String>>,
) -> BatchResult {
    let mut seen: HashSet<String> = existing_ids.cloned().unwrap_or_default();
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    let mut duplicates = 0usize;

    for (index, record) in records.iter().enumerate() {
        let id = record.yatri_id.clone().unwrap_or_default();
        if !seen.insert(id.clone()) {
            duplicates += 1;
            invalid.push(InvalidRow {
                row: index + 1,
                record: record.clone(),
                reasons: vec![format!("Duplicate Yatri ID: {}", id)],
            });
            continue;
        }

        let outcome = validate(record);
        if outcome.is_valid {
            valid.push(sanitize(record));
        } else {
            invalid.push(InvalidRow {
                row: index + 1,
                record: record.clone(),
                reasons: outcome.errors,
            });
        }
    }

    let total = records.len();
    let validation_rate = if total == 0 {
        // 0/0 is defined as 0 rather than NaN
        0.0
    } else {
        round2(valid.len() as f64 / total as f64 * 100.0)
    };

    BatchResult {
        summary: BatchSummary {
            total,
            valid: valid.len(),
            invalid: invalid.len(),
            duplicates,
            validation_rate,
        },
        valid,
        invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record(id: &str) -> RawRecord {
        RawRecord {
            yatri_id: Some(id.to_string()),
            first_name: Some("Asha".to_string()),
            last_name: Some("Patil".to_string()),
            email: Some("asha@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_batch_has_zero_rate() {
        let result = process_batch(&[], None);

        assert_eq!(result.summary.total, 0);
        assert_eq!(result.summary.validation_rate, 0.0);
        assert!(result.valid.is_empty());
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_conservation_valid_plus_invalid_equals_total() {
        let records = vec![
            valid_record("A"),
            RawRecord::default(),
            valid_record("A"),
            valid_record("B"),
        ];

        let result = process_batch(&records, None);

        assert_eq!(
            result.valid.len() + result.invalid.len(),
            result.summary.total
        );
        assert_eq!(result.summary.total, 4);
    }

    #[test]
    fn test_within_batch_duplicate_detected() {
        let records = vec![valid_record("A"), valid_record("A")];

        let result = process_batch(&records, None);

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.summary.duplicates, 1);
        assert!(result.invalid[0].reasons[0].contains("Duplicate Yatri ID: A"));
    }

    #[test]
    fn test_duplicate_skips_validation() {
        // Second row has a broken email too, but the duplicate reason is the
        // only one reported
        let mut second = valid_record("A");
        second.email = Some("broken".to_string());
        let records = vec![valid_record("A"), second];

        let result = process_batch(&records, None);

        assert_eq!(
            result.invalid[0].reasons,
            vec!["Duplicate Yatri ID: A".to_string()]
        );
    }

    #[test]
    fn test_existing_ids_seed_the_seen_set() {
        let existing: HashSet<String> = ["A".to_string()].into_iter().collect();
        let records = vec![valid_record("A"), valid_record("B")];

        let result = process_batch(&records, Some(&existing));

        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].yatri_id.as_deref(), Some("B"));
        assert_eq!(result.summary.duplicates, 1);
    }

    #[test]
    fn test_summary_for_mixed_batch() {
        // Row 2 duplicates row 1, row 3 is valid and unique
        let records = vec![valid_record("A"), valid_record("A"), valid_record("B")];

        let result = process_batch(&records, None);

        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.valid, 2);
        assert_eq!(result.summary.invalid, 1);
        assert_eq!(result.summary.duplicates, 1);
        assert_eq!(result.summary.validation_rate, 66.67);
    }

    #[test]
    fn test_validation_rate_rounded_to_two_decimals() {
        let records = vec![valid_record("A"), valid_record("A"), RawRecord::default()];

        let result = process_batch(&records, None);

        assert_eq!(result.summary.valid, 1);
        assert_eq!(result.summary.invalid, 2);
        assert_eq!(result.summary.duplicates, 1);
        assert_eq!(result.summary.validation_rate, 33.33);
    }

    #[test]
    fn test_invalid_rows_keep_input_order() {
        let records = vec![
            RawRecord::default(),  // row 1: validation failure
            valid_record("A"),     // row 2: ok
            valid_record("A"),     // row 3: duplicate
            RawRecord::default(),  // row 4: duplicate of the empty id in row 1
            valid_record("B"),     // row 5: ok
        ];

        let result = process_batch(&records, None);

        let rows: Vec<usize> = result.invalid.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 3, 4]);
        assert!(result.invalid[1].reasons[0].starts_with("Duplicate Yatri ID"));
        assert!(result.invalid[2].reasons[0].starts_with("Duplicate Yatri ID"));
    }

    #[test]
    fn test_valid_rows_are_sanitized() {
        let mut record = valid_record("A");
        record.gender = Some("FEMALE".to_string());
        record.first_name = Some("  <i>Asha</i> ".to_string());

        let result = process_batch(&[record], None);

        assert_eq!(result.valid[0].gender.as_deref(), Some("female"));
        assert_eq!(result.valid[0].first_name.as_deref(), Some("Asha"));
    }
}
