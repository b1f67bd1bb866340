//! [`HorizonProjector`] using the hour-angle transform and Saemundsson refraction.
//!
//! Positions are treated as geocentric: diurnal parallax (up to ~1° for
//! the Moon) is not applied.

use udaya_core::{
    CoordinateFrame, GeoLocation, HorizonProjector, HorizontalPosition, ProviderError, SkyCoords,
    ecliptic_to_equatorial, equatorial_to_horizontal, local_sidereal_time_deg, mean_obliquity_deg,
};

/// Below this true altitude refraction is not applied.
const REFRACTION_FLOOR_DEG: f64 = -2.0;

/// Atmospheric refraction for a true (airless) altitude, in degrees.
///
/// Saemundsson (1986): `R = 1.02′ / tan(h + 10.3/(h + 5.11))`, scaled by
/// `(P/1010)·(283/(273 + T))`. Returns 0 below [`REFRACTION_FLOOR_DEG`].
pub fn saemundsson_refraction_deg(true_alt_deg: f64, pressure_hpa: f64, temperature_c: f64) -> f64 {
    if true_alt_deg < REFRACTION_FLOOR_DEG {
        return 0.0;
    }
    let h = true_alt_deg;
    let r_arcmin = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
    let scale = (pressure_hpa / 1010.0) * (283.0 / (273.0 + temperature_c));
    (r_arcmin * scale / 60.0).max(0.0)
}

/// Horizon projector with a standard atmosphere for refraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticHorizon {
    /// Surface pressure in hPa.
    pub pressure_hpa: f64,
    /// Surface temperature in °C.
    pub temperature_c: f64,
}

impl Default for AnalyticHorizon {
    fn default() -> Self {
        Self {
            pressure_hpa: 1013.25,
            temperature_c: 10.0,
        }
    }
}

impl HorizonProjector for AnalyticHorizon {
    fn horizontal(
        &self,
        jd: f64,
        geo: &GeoLocation,
        coords: SkyCoords,
    ) -> Result<HorizontalPosition, ProviderError> {
        if !jd.is_finite() {
            return Err(ProviderError::InvalidEpoch(jd));
        }
        geo.validate().map_err(ProviderError::Computation)?;
        if !coords.lon_deg.is_finite() || !coords.lat_deg.is_finite() {
            return Err(ProviderError::Computation("target coordinates must be finite"));
        }

        let (ra, dec) = match coords.frame {
            CoordinateFrame::Equatorial => (coords.lon_deg, coords.lat_deg),
            CoordinateFrame::Ecliptic => {
                ecliptic_to_equatorial(coords.lon_deg, coords.lat_deg, mean_obliquity_deg(jd))
            }
        };

        let lst = local_sidereal_time_deg(jd, geo.longitude_deg);
        let (alt, az) = equatorial_to_horizontal(lst, geo.latitude_deg, ra, dec);
        let refraction = saemundsson_refraction_deg(alt, self.pressure_hpa, self.temperature_c);

        Ok(HorizontalPosition {
            true_altitude_deg: alt,
            apparent_altitude_deg: (alt + refraction).min(90.0),
            azimuth_deg: az,
        })
    }
}
