use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A monitoring location from the sites upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Site {
    #[validate(length(min = 1))]
    pub site_id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Site {
    pub fn new(site_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            site_id: site_id.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_validation() {
        let site = Site::new("USGS-01646500", 38.9497, -77.1276);

        assert!(site.validate().is_ok());
        assert_eq!(site.coordinates(), Coordinates::new(38.9497, -77.1276));
    }

    #[test]
    fn test_invalid_coordinates() {
        let site = Site::new("USGS-01646500", 91.0, -77.1276);
        assert!(site.validate().is_err());

        let site = Site::new("USGS-01646500", 38.9, -181.0);
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_empty_site_id_rejected() {
        let site = Site::new("", 38.9497, -77.1276);
        assert!(site.validate().is_err());
    }
}
