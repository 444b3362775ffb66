//! Reading transaction exports from CSV.

use crate::model::RawRecord;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const STDIN: &str = "-";

/// Parses CSV text with a header row into records.
///
/// Each data row is zipped with the header row, so a short row yields a record with only the
/// leading fields and extra values on a long row are dropped. An input with no header row yields
/// no records. Blank lines are skipped.
pub fn parse_records(reader: impl Read) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = rdr.records();

    let headers = match rows.next() {
        Some(header_row) => header_row.context("Unable to read the CSV header row")?,
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for (row_ix, row) in rows.enumerate() {
        // +2: one for the header and one because rows are numbered from 1
        let row = row.with_context(|| format!("Unable to read CSV row {}", row_ix + 2))?;
        records.push(RawRecord::zip(headers.iter(), row.iter()));
    }
    Ok(records)
}

/// Reads a CSV file with a header row into records.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Unable to open file {}", path.display()))?;
    let records = parse_records(std::io::BufReader::new(file))
        .with_context(|| format!("Unable to parse CSV file {}", path.display()))?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Like `read_records`, but a path of `-` reads from stdin.
pub fn read_input(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    if path != Path::new(STDIN) {
        return read_records(path);
    }
    let records =
        parse_records(std::io::stdin().lock()).context("Unable to parse CSV from stdin")?;
    debug!("Read {} records from stdin", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AMOUNT, CATEGORY, DATE, MINT_HEADERS, NOTES};
    use crate::test::SAMPLE_CSV;

    #[test]
    fn test_parse_sample() {
        let records = parse_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 5);
        let first = &records[0];
        assert_eq!(first.names().collect::<Vec<_>>(), MINT_HEADERS.to_vec());
        assert_eq!(first.get(DATE), Some("01/15/2020"));
        assert_eq!(first.get(AMOUNT), Some("4.50"));
        assert_eq!(first.get(CATEGORY), Some("Coffee Shops"));
    }

    #[test]
    fn test_quoted_commas() {
        let records = parse_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records[3].get(NOTES), Some("dinner, split"));
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let csv = "a,b\n x ,y\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].get("a"), Some(" x "));
    }

    #[test]
    fn test_short_and_long_rows() {
        let csv = "a,b,c\n1\n1,2,3,4\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[1].get("c"), Some("3"));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n\n";
        let records = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("a"), Some("3"));
    }

    #[test]
    fn test_header_only() {
        let records = parse_records("a,b\n".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let records = parse_records("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("transactions.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        assert_eq!(read_input(&path).unwrap(), read_records(&path).unwrap());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let e = read_records(dir.path().join("nope.csv")).unwrap_err();
        assert!(e.to_string().contains("Unable to open file"));
    }
}
