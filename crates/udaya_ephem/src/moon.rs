//! Lunar ecliptic longitude and latitude from the principal periodic terms.
//!
//! Astronomical Almanac low-precision lunar formulas (accuracy ~0.3° in
//! longitude, ~0.2° in latitude). `T` is Julian centuries from J2000.0;
//! every argument is linear in `T`, so rates follow by differentiating
//! each sine term.

use udaya_core::{jd_to_centuries, normalize_360};

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Each row: `[amplitude_deg, phase_deg, rate_deg_per_century]`.
#[rustfmt::skip]
static LONGITUDE_TERMS: [[f64; 3]; 6] = [
    [ 6.29, 135.0,  477_198.87],
    [-1.27, 259.3, -413_335.36],
    [ 0.66, 235.7,  890_534.22],
    [ 0.21, 269.9,  954_397.74],
    [-0.19, 357.5,   35_999.05],
    [-0.11, 186.5,  966_404.03],
];

#[rustfmt::skip]
static LATITUDE_TERMS: [[f64; 3]; 4] = [
    [ 5.13,  93.3,  483_202.02],
    [ 0.28, 228.2,  960_400.89],
    [-0.28, 318.3,    6_003.15],
    [-0.17, 217.6, -407_332.21],
];

const MEAN_LON_PHASE: f64 = 218.32;
const MEAN_LON_RATE: f64 = 481_267.881;

/// Moon position and rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Longitude rate in degrees per day.
    pub speed_deg_per_day: f64,
    /// Latitude rate in degrees per day.
    pub latitude_speed_deg_per_day: f64,
}

/// Sum `a·sin(phase + rate·T)` over `terms`, returning `(value, d/dT)`.
fn periodic_sum(terms: &[[f64; 3]], t: f64) -> (f64, f64) {
    terms.iter().fold((0.0, 0.0), |(v, dv), &[amp, phase, rate]| {
        let arg = (phase + rate * t).to_radians();
        (v + amp * arg.sin(), dv + amp * arg.cos() * rate.to_radians())
    })
}

/// Moon longitude, latitude and their rates at a Julian Date.
pub fn moon_state(jd: f64) -> MoonState {
    let t = jd_to_centuries(jd);

    let (lon_p, dlon_p) = periodic_sum(&LONGITUDE_TERMS, t);
    let (lat, dlat) = periodic_sum(&LATITUDE_TERMS, t);

    MoonState {
        longitude_deg: normalize_360(MEAN_LON_PHASE + MEAN_LON_RATE * t + lon_p),
        latitude_deg: lat,
        speed_deg_per_day: (MEAN_LON_RATE + dlon_p) / DAYS_PER_CENTURY,
        latitude_speed_deg_per_day: dlat / DAYS_PER_CENTURY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use udaya_core::{J2000_JD, signed_arc_deg};

    #[test]
    fn j2000_longitude() {
        // Geocentric lunar longitude at J2000.0 ≈ 223.3°
        let m = moon_state(J2000_JD);
        assert!(
            signed_arc_deg(223.3, m.longitude_deg).abs() < 0.5,
            "moon lon = {}",
            m.longitude_deg
        );
    }

    #[test]
    fn latitude_bounded() {
        for i in 0..60 {
            let m = moon_state(J2000_JD + i as f64 * 0.9);
            assert!(m.latitude_deg.abs() < 5.9, "lat = {}", m.latitude_deg);
        }
    }

    #[test]
    fn speed_in_lunar_range() {
        for i in 0..30 {
            let s = moon_state(J2000_JD + i as f64).speed_deg_per_day;
            assert!((10.5..16.0).contains(&s), "speed = {s}");
        }
    }

    #[test]
    fn speed_matches_finite_difference() {
        let jd = 2_458_000.7;
        let h = 0.001;
        let a = moon_state(jd - h);
        let b = moon_state(jd + h);
        let fd = signed_arc_deg(a.longitude_deg, b.longitude_deg) / (2.0 * h);
        let m = moon_state(jd);
        assert_abs_diff_eq!(m.speed_deg_per_day, fd, epsilon = 1e-4);
        let fd_lat = (b.latitude_deg - a.latitude_deg) / (2.0 * h);
        assert_abs_diff_eq!(m.latitude_speed_deg_per_day, fd_lat, epsilon = 1e-4);
    }
}
