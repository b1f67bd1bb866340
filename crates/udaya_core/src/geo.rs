//! Observer location.

use serde::{Deserialize, Serialize};

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    pub altitude_m: f64,
}

impl GeoLocation {
    /// Create a new geographic location.
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err("latitude_deg must be within [-90, 90]");
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err("longitude_deg must be within [-180, 180]");
        }
        if !self.altitude_m.is_finite() {
            return Err("altitude_m must be finite");
        }
        Ok(())
    }
}
