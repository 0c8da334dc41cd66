//! Crawl result output
//!
//! The crawl itself produces plain [`Record`]s; rendering them is the
//! caller's concern. This module is that caller-side boundary: it writes
//! the record sequence as pretty-printed JSON, with missing fields
//! rendered as the "Null" sentinel.

use crate::crawler::record::Record;
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records as pretty JSON to `path`, or to stdout when no path
/// is given
///
/// # Arguments
///
/// * `records` - The crawl result, in traversal order
/// * `path` - Destination file; `None` writes to stdout
///
/// # Returns
///
/// * `Ok(())` - Records written
/// * `Err(ScrapeError)` - IO or serialization failure
pub fn write_records(records: &[Record], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            tracing::info!("Wrote {} record(s) to {}", records.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, records)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::record::parse_record;

    #[test]
    fn writes_json_array_with_sentinels() {
        let records = vec![parse_record("<html><body></body></html>")];
        let file = tempfile::NamedTempFile::new().unwrap();

        write_records(&records, Some(file.path())).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();

        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["PubMed_ID"], "Null");
        assert_eq!(array[0]["Abstract"], "Null");
        assert_eq!(array[0].as_object().unwrap().len(), 6);
    }

    #[test]
    fn empty_result_is_an_empty_array() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_records(&[], Some(file.path())).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written.trim(), "[]");
    }
}
