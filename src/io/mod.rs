//! I/O module
//!
//! Handles operations-file parsing for replay.
//!
//! # Components
//!
//! - `csv_format` - operations CSV format (row conversion, pure)
//! - `OpsReader` - streaming CSV reader with an iterator interface

pub mod csv_format;

pub use csv_format::{convert_op_record, OpRecord, Operation};

use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming operations-file reader
///
/// Yields one `Result<Operation, LedgerError>` per CSV row. Rows are read one
/// at a time; the file is never loaded into memory wholesale. Fatal problems
/// (file not found) surface from [`OpsReader::new`]; per-row parse failures
/// are yielded as `Err` items so the caller can skip them and continue.
#[derive(Debug)]
pub struct OpsReader {
    reader: csv::Reader<File>,
}

impl OpsReader {
    /// Open an operations file for streaming iteration
    ///
    /// The CSV reader trims whitespace and tolerates rows that omit trailing
    /// optional columns.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::Io {
            message: format!("failed to open '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self { reader })
    }
}

impl Iterator for OpsReader {
    type Item = Result<Operation, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut raw = csv::StringRecord::new();
        match self.reader.read_record(&mut raw) {
            Ok(false) => None,
            Ok(true) => {
                // The parser's own position survives quoted multi-line
                // fields; a row counter would not.
                let line = raw.position().map(|pos| pos.line());
                let headers = match self.reader.headers() {
                    Ok(headers) => headers.clone(),
                    Err(e) => return Some(Err(e.into())),
                };
                let parsed: Result<OpRecord, csv::Error> = raw.deserialize(Some(&headers));
                let item = match parsed {
                    Ok(record) => convert_op_record(record).map_err(|e| match e {
                        // Attach the row position lost in pure conversion.
                        LedgerError::Parse { message, .. } => LedgerError::Parse { line, message },
                        other => other,
                    }),
                    Err(e) => Err(e.into()),
                };
                Some(item)
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    const HEADER: &str = "op,label,customer,name,kind,method,amount,date,description\n";

    #[test]
    fn test_reads_operations_in_order() {
        let content = format!(
            "{}customer,c1,,Acme,,,,,\n\
             obligation,o1,c1,,receivable,,1000.00,2025-06-01,\n\
             settle,o1,,,,,400,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let operations: Vec<Operation> = OpsReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(operations.len(), 3);
        assert!(matches!(operations[0], Operation::Customer { .. }));
        assert!(matches!(operations[1], Operation::Obligation { .. }));
        assert!(matches!(operations[2], Operation::Settle { .. }));
    }

    #[test]
    fn test_yields_error_for_bad_row_and_continues() {
        let content = format!(
            "{}customer,c1,,Acme,,,,,\n\
             teleport,x,,,,,,,\n\
             cash,,,,income,cash,300,2025-06-01,till\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let items: Vec<_> = OpsReader::new(file.path()).unwrap().collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(LedgerError::Parse { line: Some(3), .. })
        ));
        assert!(items[2].is_ok());
    }

    #[test]
    fn test_error_line_survives_multiline_quoted_fields() {
        // The customer row's quoted description spans lines 2-3, so the bad
        // row starts on physical line 4.
        let content = format!(
            "{}customer,c1,,Acme,,,,,\"first line\nsecond line\"\n\
             teleport,x,,,,,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let items: Vec<_> = OpsReader::new(file.path()).unwrap().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(LedgerError::Parse { line: Some(4), .. })
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = OpsReader::new(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }
}
