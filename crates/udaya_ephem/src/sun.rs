//! Solar ecliptic longitude, low-precision series.
//!
//! Astronomical Almanac "low precision formulas for the Sun", valid
//! 1950–2050 to about 0.01°:
//!
//! ```text
//! n = JD − 2451545.0
//! L = 280.460° + 0.9856474° n          (mean longitude)
//! g = 357.528° + 0.9856003° n          (mean anomaly)
//! λ = L + 1.915° sin g + 0.020° sin 2g
//! ```

use udaya_core::{J2000_JD, normalize_360};

const MEAN_LON_RATE: f64 = 0.985_647_4;
const MEAN_ANOMALY_RATE: f64 = 0.985_600_3;

/// Solar longitude and its rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunState {
    /// Geometric ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Longitude rate in degrees per day.
    pub speed_deg_per_day: f64,
}

/// Sun longitude and speed at a Julian Date.
pub fn sun_state(jd: f64) -> SunState {
    let n = jd - J2000_JD;
    let l = 280.460 + MEAN_LON_RATE * n;
    let g = (357.528 + MEAN_ANOMALY_RATE * n).to_radians();

    let lon = l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin();
    // dλ/dn: derivative of the equation of centre, rate converted to rad/day.
    let speed = MEAN_LON_RATE
        + (1.915 * g.cos() + 0.040 * (2.0 * g).cos()) * MEAN_ANOMALY_RATE.to_radians();

    SunState {
        longitude_deg: normalize_360(lon),
        speed_deg_per_day: speed,
    }
}
