//! CSV and zipped-CSV payloads -> raw tables

use crate::errors::{SourceError, SourceResult};
use bhavcopy_core::{RawTable, RawValue};
use csv::ReaderBuilder;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

/// Header labels that are artefacts of trailing delimiters, not columns
fn is_placeholder_header(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || label.starts_with("Unnamed")
}

/// Decode a CSV payload with a header row.
///
/// Short rows are padded and long rows truncated to the header width.
/// Blank cells become `Null`; everything else stays text for the
/// normalizer to coerce. A payload with no data rows is `None`.
pub fn decode_csv<R: Read>(reader: R) -> SourceResult<Option<RawTable>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let keep: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, label)| !is_placeholder_header(label))
        .map(|(i, _)| i)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<RawValue> = keep
            .iter()
            .map(|&i| match record.get(i) {
                Some(cell) if !cell.trim().is_empty() => RawValue::text(cell),
                _ => RawValue::Null,
            })
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Ok(None);
    }

    let dropped = headers.len() - keep.len();
    if dropped > 0 {
        debug!("Dropped {} placeholder columns", dropped);
    }
    let headers = keep.iter().map(|&i| headers[i].clone()).collect();
    Ok(Some(RawTable::new(headers, rows)?))
}

/// Decode the first file of a ZIP archive as CSV
pub fn decode_zipped_csv(bytes: &[u8]) -> SourceResult<Option<RawTable>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    if archive.len() == 0 {
        return Err(SourceError::EmptyArchive);
    }

    let file = archive.by_index(0)?;
    debug!("Reading {} from archive", file.name());
    decode_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const LEGACY_CSV: &str = "SYMBOL,SERIES,OPEN,CLOSE,TOTTRDQTY,TIMESTAMP,\n\
                              INFY,EQ,1500.5,1510,120000,02-JAN-2023,\n\
                              TCS,EQ,3200,,5000,02-JAN-2023,\n";

    fn zipped(name: &str, body: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(name, FileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_trailing_delimiter_column_is_dropped() {
        let table = decode_csv(LEGACY_CSV.as_bytes()).unwrap().unwrap();

        assert_eq!(
            table.headers(),
            &["SYMBOL", "SERIES", "OPEN", "CLOSE", "TOTTRDQTY", "TIMESTAMP"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1][3], RawValue::Null);
        assert_eq!(table.rows()[0][0], RawValue::text("INFY"));
    }

    #[test]
    fn test_unnamed_columns_dropped_and_padding_kept() {
        let csv = "SYMBOL, SERIES,Unnamed: 2, CLOSE_PRICE\nSBIN, EQ,x, 612.40\nLT, EQ\n";
        let table = decode_csv(csv.as_bytes()).unwrap().unwrap();

        assert_eq!(table.headers(), &["SYMBOL", " SERIES", " CLOSE_PRICE"]);
        assert_eq!(table.rows()[0][2], RawValue::text(" 612.40"));
        assert_eq!(table.rows()[1][2], RawValue::Null);
    }

    #[test]
    fn test_header_only_payload_is_no_data() {
        assert!(decode_csv("SYMBOL,CLOSE\n".as_bytes()).unwrap().is_none());
        assert!(decode_csv("".as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_zipped_csv() {
        let bytes = zipped("cm02JAN2023bhav.csv", LEGACY_CSV);
        let table = decode_zipped_csv(&bytes).unwrap().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_archive() {
        let bytes = ZipWriter::new(Cursor::new(Vec::new()))
            .finish()
            .unwrap()
            .into_inner();
        assert!(matches!(decode_zipped_csv(&bytes), Err(SourceError::EmptyArchive)));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode_zipped_csv(b"<html>blocked</html>").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Decode);
    }
}
