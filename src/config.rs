use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::models::CharacteristicRange;
use crate::utils::constants::{
    COL_ACTIVITY_START_DATE, COL_CHARACTERISTIC_NAME, COL_LATITUDE_MEASURE,
    COL_LONGITUDE_MEASURE, COL_MONITORING_LOCATION_ID, COL_RESULT_MEASURE_VALUE,
    DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN, ENV_PREFIX,
};

/// Column names expected in the results upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ResultsColumns {
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub characteristic: String,
    #[validate(length(min = 1))]
    pub site_id: String,
    #[validate(length(min = 1))]
    pub value: String,
}

impl Default for ResultsColumns {
    fn default() -> Self {
        Self {
            date: COL_ACTIVITY_START_DATE.to_string(),
            characteristic: COL_CHARACTERISTIC_NAME.to_string(),
            site_id: COL_MONITORING_LOCATION_ID.to_string(),
            value: COL_RESULT_MEASURE_VALUE.to_string(),
        }
    }
}

/// Column names expected in the sites upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteColumns {
    #[validate(length(min = 1))]
    pub site_id: String,
    #[validate(length(min = 1))]
    pub latitude: String,
    #[validate(length(min = 1))]
    pub longitude: String,
}

impl Default for SiteColumns {
    fn default() -> Self {
        Self {
            site_id: COL_MONITORING_LOCATION_ID.to_string(),
            latitude: COL_LATITUDE_MEASURE.to_string(),
            longitude: COL_LONGITUDE_MEASURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    #[validate(nested)]
    pub results: ResultsColumns,

    #[validate(nested)]
    pub sites: SiteColumns,

    /// Tried after the built-in date formats.
    pub date_formats: Vec<String>,

    /// Single-character field delimiter. Sniffed from the header when unset.
    #[validate(length(equal = 1))]
    pub delimiter: Option<String>,

    /// Slider bounds reported for a characteristic with no usable values.
    pub no_data_min: f64,
    pub no_data_max: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results: ResultsColumns::default(),
            sites: SiteColumns::default(),
            date_formats: Vec::new(),
            delimiter: None,
            no_data_min: DEFAULT_RANGE_MIN,
            no_data_max: DEFAULT_RANGE_MAX,
        }
    }
}

impl Settings {
    /// Load settings from an optional file, overridden by `WQ_*` environment
    /// variables (`WQ_RESULTS__VALUE` sets `results.value`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if let Some(delimiter) = &self.delimiter {
            if !delimiter.is_ascii() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "delimiter '{}' must be a single ASCII character",
                    delimiter
                )));
            }
        }

        if self.no_data_min > self.no_data_max {
            return Err(ProcessingError::InvalidFormat(format!(
                "no_data_min {} is greater than no_data_max {}",
                self.no_data_min, self.no_data_max
            )));
        }

        Ok(())
    }

    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter
            .as_deref()
            .and_then(|d| d.bytes().next())
    }

    pub fn no_data_range(&self) -> CharacteristicRange {
        CharacteristicRange::no_data_with(self.no_data_min, self.no_data_max)
    }
}
