use crate::config::{Settings, SiteColumns};
use crate::error::{Result, UploadKind};
use crate::models::{GapKind, IngestReport, Site};
use crate::readers::table::{cell, TableReader};
use crate::readers::upload::decode_upload;
use crate::utils::coordinates::parse_coordinate;
use crate::utils::identifiers::normalize_site_id;
use tracing::{debug, info};
use validator::Validate;

/// Reads the site-locations upload.
pub struct SiteReader {
    columns: SiteColumns,
    delimiter: Option<u8>,
}

impl SiteReader {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            columns: settings.sites.clone(),
            delimiter: settings.delimiter_byte(),
        }
    }

    /// Decode and normalize a sites upload.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<(Vec<Site>, IngestReport)> {
        let text = decode_upload(bytes, UploadKind::Sites)?;
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<(Vec<Site>, IngestReport)> {
        let upload = UploadKind::Sites;
        let (columns, rows) = TableReader::with_delimiter(self.delimiter).read(text, upload)?;

        let site_idx = columns.require(&self.columns.site_id, upload)?;
        let lat_idx = columns.require(&self.columns.latitude, upload)?;
        let lon_idx = columns.require(&self.columns.longitude, upload)?;

        let mut report = IngestReport::new(upload);
        let mut sites = Vec::new();

        for (i, row) in rows.enumerate() {
            let row = row?;
            let row_number = i + 1;
            report.rows_read += 1;

            let site_raw = cell(&row, site_idx);
            let site_id = normalize_site_id(site_raw);
            if site_id.is_none() {
                report.record_gap(row_number, &self.columns.site_id, site_raw, GapKind::MissingField);
            }

            let latitude = self.coordinate(&row, lat_idx, &self.columns.latitude, row_number, &mut report);
            let longitude = self.coordinate(&row, lon_idx, &self.columns.longitude, row_number, &mut report);

            let (Some(site_id), Some(latitude), Some(longitude)) = (site_id, latitude, longitude) else {
                debug!(row = row_number, "dropping incomplete sites row");
                continue;
            };

            let site = Site::new(site_id, latitude, longitude);
            if site.validate().is_err() {
                report.record_gap(
                    row_number,
                    &format!("{}/{}", self.columns.latitude, self.columns.longitude),
                    &format!("{},{}", latitude, longitude),
                    GapKind::InvalidCoordinate,
                );
                continue;
            }

            sites.push(site);
        }

        report.rows_kept = sites.len();
        info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            gaps = report.gaps.len(),
            "normalized sites upload"
        );

        Ok((sites, report))
    }

    fn coordinate(
        &self,
        row: &csv::StringRecord,
        index: usize,
        column: &str,
        row_number: usize,
        report: &mut IngestReport,
    ) -> Option<f64> {
        let raw = cell(row, index);
        if raw.is_empty() {
            report.record_gap(row_number, column, raw, GapKind::MissingField);
            return None;
        }

        match parse_coordinate(raw) {
            Ok(value) => Some(value),
            Err(_) => {
                report.record_gap(row_number, column, raw, GapKind::InvalidCoordinate);
                None
            }
        }
    }
}

impl Default for SiteReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IngestionError, ProcessingError};
    use pretty_assertions::assert_eq;

    const HEADER: &str =
        "OrganizationIdentifier,MonitoringLocationIdentifier,MonitoringLocationName,LatitudeMeasure,LongitudeMeasure";

    #[test]
    fn test_read_sites() -> Result<()> {
        let text = format!(
            "{HEADER}\n\
             USGS,A,Potomac River,40.0,-75.0\n\
             USGS,B,Little Falls,38:56:59,-77:07:39\n"
        );

        let (sites, report) = SiteReader::new().read_str(&text)?;

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0], Site::new("A", 40.0, -75.0));
        assert_eq!(sites[1].site_id, "B");
        assert!((sites[1].latitude - 38.949722).abs() < 0.00001);
        assert!(report.gaps.is_empty());
        Ok(())
    }

    #[test]
    fn test_rows_without_coordinates_are_dropped() -> Result<()> {
        let text = format!(
            "{HEADER}\n\
             USGS,A,Potomac River,,-75.0\n\
             USGS,B,Little Falls,38.9,\n\
             USGS,,Nameless,38.9,-77.1\n\
             USGS,C,Bad Lat,north,-77.1\n\
             USGS,D,Off Globe,95.0,-77.1\n\
             USGS,E,Kept,38.9,-77.1\n"
        );

        let (sites, report) = SiteReader::new().read_str(&text)?;

        assert_eq!(sites, vec![Site::new("E", 38.9, -77.1)]);
        assert_eq!(report.rows_read, 6);
        assert_eq!(report.rows_dropped(), 5);
        let counts = report.gap_counts();
        assert_eq!(counts[&GapKind::MissingField], 3);
        assert_eq!(counts[&GapKind::InvalidCoordinate], 2);
        Ok(())
    }

    #[test]
    fn test_zero_coordinates_are_kept() -> Result<()> {
        let text = format!("{HEADER}\nUSGS,Z,Null Island,0.0,0.0\n");

        let (sites, _) = SiteReader::new().read_str(&text)?;
        assert_eq!(sites, vec![Site::new("Z", 0.0, 0.0)]);
        Ok(())
    }

    #[test]
    fn test_missing_longitude_column() {
        let text = "MonitoringLocationIdentifier,LatitudeMeasure\nA,40.0\n";

        let err = SiteReader::new().read_str(text).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::Ingestion(IngestionError::MissingColumn {
                upload: UploadKind::Sites,
                ..
            })
        ));
    }
}
