use crate::error::{IngestionError, Result, UploadKind};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

/// Positions of the named columns in a header row.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            // First occurrence wins for duplicated header names
            positions.entry(name.trim().to_string()).or_insert(i);
        }
        Self { positions }
    }

    pub fn get(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Look up a column that the upload must have.
    pub fn require(&self, column: &str, upload: UploadKind) -> Result<usize> {
        self.get(column).ok_or_else(|| {
            IngestionError::MissingColumn {
                upload,
                column: column.to_string(),
            }
            .into()
        })
    }
}

/// Delimited-text reader shared by the results and sites readers.
pub struct TableReader {
    delimiter: Option<u8>,
}

impl TableReader {
    pub fn with_delimiter(delimiter: Option<u8>) -> Self {
        Self { delimiter }
    }

    /// Parse `text` into its header index and data rows.
    ///
    /// Rows may be shorter than the header; absent trailing cells read as empty.
    pub fn read<'a>(
        &self,
        text: &'a str,
        upload: UploadKind,
    ) -> Result<(ColumnIndex, csv::StringRecordsIntoIter<&'a [u8]>)> {
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(text));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(IngestionError::EmptyUpload { upload }.into());
        }

        Ok((ColumnIndex::from_headers(&headers), reader.into_records()))
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::with_delimiter(None)
    }
}

/// Pick the delimiter from the header line: tab-separated exports have tabs and
/// no commas in the header, everything else is read as comma-separated.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    if header.contains('\t') && !header.contains(',') {
        b'\t'
    } else {
        b','
    }
}

/// Cell contents, with absent cells read as empty.
pub fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
