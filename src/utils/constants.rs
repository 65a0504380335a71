/// Results upload columns
pub const COL_ACTIVITY_START_DATE: &str = "ActivityStartDate";
pub const COL_CHARACTERISTIC_NAME: &str = "CharacteristicName";
pub const COL_MONITORING_LOCATION_ID: &str = "MonitoringLocationIdentifier";
pub const COL_RESULT_MEASURE_VALUE: &str = "ResultMeasureValue";

/// Sites upload columns
pub const COL_LATITUDE_MEASURE: &str = "LatitudeMeasure";
pub const COL_LONGITUDE_MEASURE: &str = "LongitudeMeasure";

/// Slider bounds used when a characteristic has no usable values
pub const DEFAULT_RANGE_MIN: f64 = 0.0;
pub const DEFAULT_RANGE_MAX: f64 = 1.0;

/// Date formats tried in order for `ActivityStartDate`
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "WQ";

/// Local file mapping threshold; smaller files are read into memory
pub const MMAP_THRESHOLD_BYTES: u64 = 8 * 1024 * 1024;
