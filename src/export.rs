//! Writing records out as a JSON array.
//!
//! The layout is fixed: `[`, then each record as a pretty-printed object with four-space
//! indentation, records separated by `,\n`, then `]`. For example:
//!
//! ```text
//! [{
//!     "Date": "01/15/2020",
//!     "Amount": "4.50"
//! },
//! {
//!     "Date": "01/20/2020",
//!     "Amount": "87.12"
//! }]
//! ```

use crate::fs;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const INDENT: &[u8] = b"    ";

/// Writes `records` to `writer` and returns how many were written.
pub fn write_json<W, I, T>(mut writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    writer.write_all(b"[").context("Unable to write JSON")?;
    let mut count = 0;
    for record in records {
        if count > 0 {
            writer.write_all(b",\n").context("Unable to write JSON")?;
        }
        let mut ser =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        record
            .serialize(&mut ser)
            .with_context(|| format!("Unable to serialize record {}", count + 1))?;
        count += 1;
    }
    writer.write_all(b"]").context("Unable to write JSON")?;
    writer.flush().context("Unable to write JSON")?;
    Ok(count)
}

/// Renders `records` in the same layout as `write_json`.
pub fn to_json_string<I, T>(records: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut buf = Vec::new();
    write_json(&mut buf, records)?;
    String::from_utf8(buf).context("Serialized JSON was not UTF-8")
}

/// Returns `path` with `.json` appended, unless it already ends with `.json`.
pub fn json_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.to_string_lossy().ends_with(".json") {
        return path.to_path_buf();
    }
    let mut s = path.as_os_str().to_owned();
    s.push(".json");
    PathBuf::from(s)
}

/// Writes `records` to the file at `json_path(path)`, replacing it if it exists. Returns the path
/// that was written.
pub fn write_json_file<I, T>(path: impl AsRef<Path>, records: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let path = json_path(path);
    let file = fs::file(&path)?;
    let count = write_json(std::io::BufWriter::new(file), records)
        .with_context(|| format!("Unable to write JSON to {}", path.display()))?;
    debug!("Wrote {count} records to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, Transaction};
    use crate::test::{raw, sample_records};

    #[test]
    fn test_layout() {
        let records = vec![
            RawRecord::zip(["Date", "Amount"], ["01/15/2020", "4.50"]),
            RawRecord::zip(["Date", "Amount"], ["01/20/2020", "87.12"]),
        ];
        let json = to_json_string(&records).unwrap();
        let expected = "[{\n    \"Date\": \"01/15/2020\",\n    \"Amount\": \"4.50\"\n},\n{\n    \"Date\": \"01/20/2020\",\n    \"Amount\": \"87.12\"\n}]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_single_record() {
        let records = vec![RawRecord::zip(["a"], ["1"])];
        assert_eq!(to_json_string(&records).unwrap(), "[{\n    \"a\": \"1\"\n}]");
    }

    #[test]
    fn test_empty() {
        let records: Vec<RawRecord> = Vec::new();
        assert_eq!(to_json_string(&records).unwrap(), "[]");
    }

    #[test]
    fn test_escaping() {
        let records = vec![RawRecord::zip(["Notes"], ["say \"hi\"\\"])];
        let json = to_json_string(&records).unwrap();
        assert!(json.contains(r#""say \"hi\"\\""#), "{json}");
    }

    #[test]
    fn test_round_trip() {
        let records = sample_records();
        let json = to_json_string(&records).unwrap();
        let back: Vec<RawRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_normalized_output() {
        let record = raw("01/15/2020", "4.50", "Groceries", "Checking");
        let tx = Transaction::normalize(&record).unwrap();
        let json = to_json_string([tx]).unwrap();
        assert!(json.contains("\"Amount\": 4.5,"), "{json}");
        assert!(json.contains("\"Date\": \"01/15/2020\","), "{json}");
    }

    #[test]
    fn test_json_path() {
        assert_eq!(json_path("out"), PathBuf::from("out.json"));
        assert_eq!(json_path("out.json"), PathBuf::from("out.json"));
        assert_eq!(json_path("dir/out.txt"), PathBuf::from("dir/out.txt.json"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let records = sample_records();
        let written = write_json_file(dir.path().join("transactions"), &records).unwrap();
        assert_eq!(written, dir.path().join("transactions.json"));
        let content = std::fs::read_to_string(&written).unwrap();
        assert_eq!(content, to_json_string(&records).unwrap());
    }
}
