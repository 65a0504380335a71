use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use wq_site_finder::models::{Coordinates, FilterSpec, GapKind, ViewWarning};
use wq_site_finder::processors::{
    apply_filters, range_for_characteristic, to_markers, to_trend, DataMerger,
};
use wq_site_finder::readers::{read_upload_file, ResultsReader, SiteReader};
use wq_site_finder::{ExplorerSession, IngestionError, ProcessingError};

const RESULTS_CSV: &str = "\
OrganizationIdentifier,ActivityIdentifier,ActivityStartDate,ActivityStartTime/Time,MonitoringLocationIdentifier,CharacteristicName,ResultMeasureValue,ResultMeasure/MeasureUnitCode
USGS-PA,nwispa.01,2020-01-01,10:15:00,A,Lead,1.0,ug/L
USGS-PA,nwispa.02,2020-01-02,09:40:00,A,Lead,3.0,ug/L
USGS-PA,nwispa.03,2020-01-03,11:05:00,A,Lead,bad,ug/L
";

const SITES_CSV: &str = "\
OrganizationIdentifier,MonitoringLocationIdentifier,MonitoringLocationName,LatitudeMeasure,LongitudeMeasure,HorizontalCoordinateReferenceSystemDatumName
USGS-PA,A,Schuylkill River at Philadelphia,40.0,-75.0,NAD83
";

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
}

#[test]
fn test_lead_at_single_site() {
    let (observations, report) = ResultsReader::new().read_str(RESULTS_CSV).unwrap();
    let (sites, _) = SiteReader::new().read_str(SITES_CSV).unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(report.gaps.len(), 1);
    assert_eq!(report.gaps[0].kind, GapKind::InvalidNumber);

    let joined = DataMerger::new().merge(observations, &sites);

    let range = range_for_characteristic(&joined.records, "Lead");
    assert_eq!(range.as_tuple(), (1.0, 3.0));
    assert!(range.has_data);

    let spec = FilterSpec::new("Lead", range.as_tuple(), (date(1), date(3)));
    let filtered = apply_filters(&joined.records, &spec);
    assert_eq!(filtered.len(), 2);
    assert!(filtered
        .iter()
        .all(|r| r.coordinates == Some(Coordinates::new(40.0, -75.0))));

    let markers = to_markers(&filtered);
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].popup_text, "Site: A<br>Value: 1.0<br>Date: 2020-01-01");
    assert_eq!(markers[1].popup_text, "Site: A<br>Value: 3.0<br>Date: 2020-01-02");

    let trend = to_trend(&filtered);
    assert_eq!(trend.len(), 2);
    let means: Vec<f64> = trend.iter().map(|p| p.mean_value).collect();
    assert_eq!(means, vec![1.0, 3.0]);
}

#[test]
fn test_unmatched_site_stays_in_join() {
    let results = format!("{RESULTS_CSV}USGS-PA,nwispa.04,2020-01-02,08:00:00,B,Lead,2.0,ug/L\n");

    let mut session = ExplorerSession::default();
    let explorer = session
        .load(results.as_bytes(), SITES_CSV.as_bytes())
        .unwrap();

    let unmatched: Vec<_> = explorer
        .records()
        .iter()
        .filter(|r| r.site_id == "B")
        .collect();
    assert_eq!(unmatched.len(), 1);
    assert_eq!(unmatched[0].coordinates, None);

    let view = explorer.view(&explorer.default_spec("Lead"));
    assert_eq!(view.records.len(), 3);
    assert_eq!(view.markers.len(), 2);
    assert!(view.markers.iter().all(|m| m.site_id == "A"));
}

#[test]
fn test_characteristic_without_rows() {
    let mut session = ExplorerSession::default();
    let explorer = session
        .load(RESULTS_CSV.as_bytes(), SITES_CSV.as_bytes())
        .unwrap();

    let range = explorer.range_for("Arsenic");
    assert_eq!(range.as_tuple(), (0.0, 1.0));
    assert!(!range.has_data);

    let spec = explorer.default_spec("Arsenic");
    assert!(apply_filters(explorer.records(), &spec).is_empty());

    let view = explorer.view(&spec);
    assert_eq!(
        view.warnings,
        vec![
            ViewWarning::NoDataForCharacteristic,
            ViewWarning::NoMatchingRecords
        ]
    );
}

#[test]
fn test_every_joined_row_has_match_or_absent_coordinates() {
    let results = format!(
        "{RESULTS_CSV}\
         USGS-PA,nwispa.05,2020-01-04,08:00:00,Z,Lead,2.0,ug/L\n\
         USGS-PA,nwispa.06,2020-01-04,08:00:00,N,Lead,2.5,ug/L\n"
    );
    let sites = format!("{SITES_CSV}USGS-PA,N,Null Island,0.0,0.0,WGS84\n");

    let mut session = ExplorerSession::default();
    let explorer = session.load(results.as_bytes(), sites.as_bytes()).unwrap();

    for record in explorer.records() {
        match record.site_id.as_str() {
            "A" => assert_eq!(record.coordinates, Some(Coordinates::new(40.0, -75.0))),
            "N" => assert_eq!(record.coordinates, Some(Coordinates::new(0.0, 0.0))),
            "Z" => assert_eq!(record.coordinates, None),
            other => panic!("unexpected site {other}"),
        }
    }
}

#[test]
fn test_inverted_range_is_empty_not_error() {
    let mut session = ExplorerSession::default();
    let explorer = session
        .load(RESULTS_CSV.as_bytes(), SITES_CSV.as_bytes())
        .unwrap();

    let spec = explorer.default_spec("Lead").with_value_range(3.0, 1.0);
    let view = explorer.view(&spec);

    assert!(view.records.is_empty());
    assert!(view.markers.is_empty());
    assert!(view.trend.is_empty());
    assert_eq!(view.warnings, vec![ViewWarning::NoMatchingRecords]);
}

#[test]
fn test_missing_column_rejects_upload() {
    let sites = "MonitoringLocationIdentifier,LatitudeMeasure\nA,40.0\n";

    let mut session = ExplorerSession::default();
    let err = session
        .load(RESULTS_CSV.as_bytes(), sites.as_bytes())
        .err()
        .expect("upload without longitude must be rejected");

    assert!(err.is_ingestion_error());
    assert!(matches!(
        err,
        ProcessingError::Ingestion(IngestionError::MissingColumn { ref column, .. })
            if column == "LongitudeMeasure"
    ));
    assert!(session.current().is_none());
}

#[test]
fn test_load_from_files() {
    let mut results_file = NamedTempFile::new().unwrap();
    results_file.write_all(RESULTS_CSV.as_bytes()).unwrap();
    let mut sites_file = NamedTempFile::new().unwrap();
    sites_file.write_all(SITES_CSV.as_bytes()).unwrap();

    let results = read_upload_file(results_file.path(), false).unwrap();
    let sites = read_upload_file(sites_file.path(), true).unwrap();

    let mut session = ExplorerSession::default();
    let explorer = session.load(&results, &sites).unwrap();

    assert_eq!(explorer.characteristics(), vec!["Lead".to_string()]);
    assert_eq!(explorer.data().results_report.rows_read, 3);
    assert_eq!(explorer.data().sites_report.rows_kept, 1);
}

#[test]
fn test_multi_site_trend() {
    let results = "\
ActivityStartDate,CharacteristicName,MonitoringLocationIdentifier,ResultMeasureValue
2021-05-01,Nitrate,S1,2.0
2021-05-01,Nitrate,S1,4.0
2021-05-01,Nitrate,S2,1.0
2021-05-02,Nitrate,S1,5.0
2021-05-02,Phosphorus,S1,0.2
";
    let sites = "\
MonitoringLocationIdentifier,LatitudeMeasure,LongitudeMeasure
S1,39.5,-76.5
S2,39.7,-76.1
";

    let mut session = ExplorerSession::default();
    let explorer = session.load(results.as_bytes(), sites.as_bytes()).unwrap();
    let view = explorer.view(&explorer.default_spec("Nitrate"));

    assert_eq!(view.records.len(), 4);
    assert_eq!(view.markers.len(), 4);
    assert_eq!(view.trend.points.len(), 3);
    assert_eq!(view.trend.points[0].site_id, "S1");
    assert_eq!(view.trend.points[0].mean_value, 3.0);
    assert_eq!(view.trend.site_ids(), vec!["S1", "S2"]);
    assert_eq!(view.trend.title, "Trend of Nitrate Over Time");
}
