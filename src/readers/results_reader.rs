use crate::config::{ResultsColumns, Settings};
use crate::error::{IngestionError, Result, UploadKind};
use crate::models::{GapKind, IngestReport, Observation};
use crate::readers::table::{cell, TableReader};
use crate::readers::upload::decode_upload;
use crate::utils::dates::parse_observation_date;
use crate::utils::identifiers::normalize_site_id;
use tracing::{debug, info, warn};

/// Reads the results upload into observations.
pub struct ResultsReader {
    columns: ResultsColumns,
    date_formats: Vec<String>,
    delimiter: Option<u8>,
    keep_missing_values: bool,
}

impl ResultsReader {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            columns: settings.results.clone(),
            date_formats: settings.date_formats.clone(),
            delimiter: settings.delimiter_byte(),
            keep_missing_values: false,
        }
    }

    /// Keep rows whose value is blank or non-numeric, with `value: None`.
    /// By default such rows are dropped like any other incomplete row.
    pub fn with_keep_missing_values(mut self, keep: bool) -> Self {
        self.keep_missing_values = keep;
        self
    }

    /// Decode and normalize a results upload.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<(Vec<Observation>, IngestReport)> {
        let text = decode_upload(bytes, UploadKind::Results)?;
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<(Vec<Observation>, IngestReport)> {
        let upload = UploadKind::Results;
        let (columns, rows) = TableReader::with_delimiter(self.delimiter).read(text, upload)?;

        let date_idx = columns.require(&self.columns.date, upload)?;
        let characteristic_idx = columns.require(&self.columns.characteristic, upload)?;
        let site_idx = columns.require(&self.columns.site_id, upload)?;
        let value_idx = columns.require(&self.columns.value, upload)?;

        let mut report = IngestReport::new(upload);
        let mut observations = Vec::new();
        let mut dates_present = 0usize;
        let mut dates_parsed = 0usize;

        for (i, row) in rows.enumerate() {
            let row = row?;
            let row_number = i + 1;
            report.rows_read += 1;

            let mut complete = true;

            let site_raw = cell(&row, site_idx);
            let site_id = normalize_site_id(site_raw);
            if site_id.is_none() {
                report.record_gap(row_number, &self.columns.site_id, site_raw, GapKind::MissingField);
                complete = false;
            }

            let characteristic = cell(&row, characteristic_idx);
            if characteristic.is_empty() {
                report.record_gap(
                    row_number,
                    &self.columns.characteristic,
                    characteristic,
                    GapKind::MissingField,
                );
                complete = false;
            }

            let date_raw = cell(&row, date_idx);
            let observed_at = if date_raw.is_empty() {
                report.record_gap(row_number, &self.columns.date, date_raw, GapKind::MissingField);
                None
            } else {
                dates_present += 1;
                let parsed = parse_observation_date(date_raw, &self.date_formats);
                match parsed {
                    Some(_) => dates_parsed += 1,
                    None => report.record_gap(
                        row_number,
                        &self.columns.date,
                        date_raw,
                        GapKind::InvalidDate,
                    ),
                }
                parsed
            };
            if observed_at.is_none() {
                complete = false;
            }

            let value_raw = cell(&row, value_idx);
            let value = match coerce_value(value_raw) {
                Ok(value) => Some(value),
                Err(kind) => {
                    report.record_gap(row_number, &self.columns.value, value_raw, kind);
                    if !self.keep_missing_values {
                        complete = false;
                    }
                    None
                }
            };

            let (Some(site_id), Some(observed_at), true) = (site_id, observed_at, complete) else {
                debug!(row = row_number, "dropping incomplete results row");
                continue;
            };

            observations.push(Observation::new(site_id, characteristic, observed_at, value));
        }

        if dates_present > 0 && dates_parsed == 0 {
            let error = IngestionError::UnparsableColumn {
                upload,
                column: self.columns.date.clone(),
                message: format!("none of {} date values could be parsed", dates_present),
            };
            warn!(%error, "rejecting results upload");
            return Err(error.into());
        }

        report.rows_kept = observations.len();
        info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            gaps = report.gaps.len(),
            "normalized results upload"
        );

        Ok((observations, report))
    }
}

impl Default for ResultsReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric coercion of a `ResultMeasureValue` cell. Blank cells are missing;
/// anything that does not read as a finite number is an invalid number.
pub fn coerce_value(raw: &str) -> std::result::Result<f64, GapKind> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GapKind::MissingField);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GapKind::InvalidNumber),
    }
}
