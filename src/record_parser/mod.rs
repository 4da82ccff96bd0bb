//! RecordParser - Delimited catalog text parsing
//!
//! ## Responsibilities
//!
//! - Header-row driven parsing of tab/comma separated catalog exports
//! - Duplicate header disambiguation (spreadsheet exports repeat columns)
//! - Row tolerance: short rows padded, long rows truncated, blank lines skipped
//!
//! No semantic validation happens here; type coercion is the
//! CatalogStore normalizer's job.

use std::collections::HashMap;

/// One parsed data row: column name -> raw string value
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    /// 1-based source line number (for skip/warn logs)
    pub line: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// Raw field value, if the column existed in the header
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    /// Raw field value or empty string
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

/// Parse delimited text with a header row into ordered records.
///
/// The delimiter is detected from the header line: tab wins over comma
/// (Sheets TSV exports embed commas inside names).
pub fn parse_records(text: &str) -> Vec<RawRecord> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header_line) = match lines.next() {
        Some(h) => h,
        None => return Vec::new(),
    };

    let delimiter = detect_delimiter(header_line);
    let headers = dedupe_headers(header_line.split(delimiter).map(|h| h.trim()));

    let mut records = Vec::new();
    for (idx, line) in lines {
        let mut values: Vec<&str> = line.split(delimiter).map(|v| v.trim()).collect();
        // Short rows: missing trailing fields are empty. Long rows: extras dropped.
        values.resize(headers.len(), "");

        let fields = headers
            .iter()
            .cloned()
            .zip(values.into_iter().map(|v| v.to_string()))
            .collect();

        records.push(RawRecord {
            line: idx + 1,
            fields,
        });
    }

    records
}

fn detect_delimiter(header: &str) -> char {
    if header.contains('\t') {
        '\t'
    } else {
        ','
    }
}

/// Rename the Nth duplicate occurrence of a header to `name_N` so every
/// column survives into the record under a distinct key.
fn dedupe_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for name in raw {
        let count = seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            headers.push(name.to_string());
        } else {
            headers.push(format!("{}_{}", name, count));
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_csv() {
        let records = parse_records("id,name\nCAM1,Dome 4MP\nCAM2,Bullet 8MP\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some("CAM1"));
        assert_eq!(records[0].get("name"), Some("Dome 4MP"));
        assert_eq!(records[1].get("id"), Some("CAM2"));
    }

    #[test]
    fn test_parse_tsv_detected_from_header() {
        let records = parse_records("id\tname\nCAM1\tDome, 4MP\n");
        assert_eq!(records.len(), 1);
        // Comma inside the value survives because the delimiter is tab
        assert_eq!(records[0].get("name"), Some("Dome, 4MP"));
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let records = parse_records("name,name,name\na,b,c\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some("a"));
        assert_eq!(records[0].get("name_2"), Some("b"));
        assert_eq!(records[0].get("name_3"), Some("c"));
    }

    #[test]
    fn test_short_row_padded_long_row_truncated() {
        let records = parse_records("a,b,c\n1,2\n1,2,3,4\n");
        assert_eq!(records[0].get("c"), Some(""));
        assert_eq!(records[1].get("c"), Some("3"));
        assert_eq!(records[1].fields.len(), 3);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = parse_records("id,name\n\n  \nCAM1,Dome\n\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("id"), Some("CAM1"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("\n\n").is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let records = parse_records("id\nB\nA\nC\n");
        let ids: Vec<&str> = records.iter().map(|r| r.get_or_empty("id")).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }
}
