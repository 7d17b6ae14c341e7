//! CSV export — flattens result rows for download by the UI layer.
//! `write_csv` is the only operation in this crate with an observable
//! side effect.

use donorpulse_core::error::DonorPulseResult;
use serde_json::Value;
use std::path::Path;

/// Render rows as CSV. Column headers come from the first row's keys;
/// string cells are quoted with `""` escaping, nulls and missing fields
/// render empty, and any other value is JSON-encoded. An empty row set
/// yields an empty string.
pub fn to_csv(rows: &[Value]) -> String {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        return String::new();
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut csv = columns.join(",");
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| match row.get(col) {
                Some(Value::String(s)) => format!("\"{}\"", s.replace('"', "\"\"")),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            })
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }

    csv
}

/// Write rows as a CSV file at `path`.
pub fn write_csv(rows: &[Value], path: &Path) -> DonorPulseResult<()> {
    std::fs::write(path, to_csv(rows))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_from_first_row_keys() {
        let rows = vec![
            json!({"period": "2024-01-01", "revenue": 300.0, "spend": 100.0}),
            json!({"period": "2024-01-02", "revenue": 150.5, "spend": 50.0}),
        ];
        let csv = to_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("period,revenue,spend"));
        assert_eq!(lines.next(), Some("\"2024-01-01\",300.0,100.0"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_string_escaping_and_missing_fields() {
        let rows = vec![
            json!({"name": "Say \"hi\"", "value": 1}),
            json!({"name": null}),
        ];
        let csv = to_csv(&rows);
        assert!(csv.contains("\"Say \"\"hi\"\"\""));
        // Missing and null cells render empty.
        assert!(csv.lines().nth(2).unwrap().ends_with(','));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_write_csv_round_trip() {
        let dir = std::env::temp_dir().join("donorpulse-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let rows = vec![json!({"channel": "sms", "conversions": 12})];
        write_csv(&rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("channel,conversions"));
        std::fs::remove_file(&path).ok();
    }
}
