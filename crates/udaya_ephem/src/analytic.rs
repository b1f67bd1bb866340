//! [`PositionProvider`] backed by the analytic Sun, Moon and node series.

use udaya_core::{
    Body, BodyPosition, GeoLocation, PositionFlags, PositionProvider, ProviderError,
    ReferencePoint, ecliptic_to_equatorial, local_sidereal_time_deg,
    longitude_to_right_ascension_deg, mean_obliquity_deg,
};

use crate::lagna::ascendant_longitude_deg;
use crate::moon::moon_state;
use crate::node::{mean_rahu_deg, mean_rahu_speed_deg_per_day};
use crate::sun::sun_state;

/// Analytic ephemeris for Sun, Moon and mean Rahu.
///
/// Other bodies are reported as [`ProviderError::UnsupportedBody`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

fn check_epoch(jd: f64) -> Result<(), ProviderError> {
    if jd.is_finite() {
        Ok(())
    } else {
        Err(ProviderError::InvalidEpoch(jd))
    }
}

impl PositionProvider for AnalyticEphemeris {
    fn position(
        &self,
        jd: f64,
        body: Body,
        flags: PositionFlags,
    ) -> Result<BodyPosition, ProviderError> {
        check_epoch(jd)?;

        let (lon, lat, speed, lat_speed) = match body {
            Body::Sun => {
                let s = sun_state(jd);
                (s.longitude_deg, 0.0, s.speed_deg_per_day, Some(0.0))
            }
            Body::Moon => {
                let m = moon_state(jd);
                (
                    m.longitude_deg,
                    m.latitude_deg,
                    m.speed_deg_per_day,
                    Some(m.latitude_speed_deg_per_day),
                )
            }
            Body::Rahu => (mean_rahu_deg(jd), 0.0, mean_rahu_speed_deg_per_day(jd), Some(0.0)),
            other => return Err(ProviderError::UnsupportedBody(other)),
        };

        let (ra, dec) = ecliptic_to_equatorial(lon, lat, mean_obliquity_deg(jd));
        let (speed, lat_speed) = if flags.with_speed {
            (speed, lat_speed)
        } else {
            (0.0, None)
        };

        Ok(BodyPosition {
            longitude_deg: lon,
            latitude_deg: lat,
            right_ascension_deg: ra,
            declination_deg: dec,
            speed_deg_per_day: speed,
            latitude_speed_deg_per_day: lat_speed,
        })
    }

    fn ascendant(&self, jd: f64, geo: &GeoLocation) -> Result<ReferencePoint, ProviderError> {
        check_epoch(jd)?;
        geo.validate().map_err(ProviderError::Computation)?;

        let eps = mean_obliquity_deg(jd);
        let lst = local_sidereal_time_deg(jd, geo.longitude_deg);
        let lon = ascendant_longitude_deg(lst, geo.latitude_deg, eps);

        Ok(ReferencePoint {
            longitude_deg: lon,
            right_ascension_deg: longitude_to_right_ascension_deg(lon, eps),
        })
    }
}
