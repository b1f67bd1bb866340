//! Ecliptic ↔ equatorial ↔ horizontal conversions.
//!
//! All angles are in degrees. Right ascension and ecliptic longitude are
//! returned in [0, 360); declination, latitude and altitude in [-90, 90];
//! azimuth is measured from north through east in [0, 360).

use crate::angle::normalize_360;
use crate::sidereal::jd_to_centuries;

/// Mean obliquity of the ecliptic at a Julian Date, in degrees.
///
/// IAU 2006 polynomial truncated to the quadratic term:
/// `ε = 23°26′21.406″ − 46.836769″·T − 0.0001831″·T²`
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    (84_381.406 - 46.836_769 * t - 0.000_183_1 * t * t) / 3600.0
}

/// Convert ecliptic `(lon, lat)` to equatorial `(ra, dec)`.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (sin_l, cos_l) = lon_deg.to_radians().sin_cos();
    let (sin_b, cos_b) = lat_deg.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();

    let ra = f64::atan2(sin_l * cos_e * cos_b - sin_b * sin_e, cos_l * cos_b);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).clamp(-1.0, 1.0).asin();

    (normalize_360(ra.to_degrees()), dec.to_degrees())
}

/// Right ascension of a point on the ecliptic (latitude zero).
pub fn longitude_to_right_ascension_deg(lon_deg: f64, obliquity_deg: f64) -> f64 {
    ecliptic_to_equatorial(lon_deg, 0.0, obliquity_deg).0
}

/// Declination of the ecliptic point with the given right ascension.
///
/// For a point on the ecliptic `tan δ = tan ε · sin α`.
pub fn ecliptic_point_declination_deg(ra_deg: f64, obliquity_deg: f64) -> f64 {
    let tan_e = obliquity_deg.to_radians().tan();
    (tan_e * ra_deg.to_radians().sin()).atan().to_degrees()
}

/// Convert equatorial `(ra, dec)` to horizontal `(altitude, azimuth)`.
///
/// `lst_deg` is the local sidereal time, `latitude_deg` the observer's
/// geodetic latitude. Hour angle `H = LST − α`.
pub fn equatorial_to_horizontal(
    lst_deg: f64,
    latitude_deg: f64,
    ra_deg: f64,
    dec_deg: f64,
) -> (f64, f64) {
    let (sin_h, cos_h) = (lst_deg - ra_deg).to_radians().sin_cos();
    let (sin_d, cos_d) = dec_deg.to_radians().sin_cos();
    let (sin_p, cos_p) = latitude_deg.to_radians().sin_cos();

    let sin_alt = (sin_p * sin_d + cos_p * cos_d * cos_h).clamp(-1.0, 1.0);
    let alt = sin_alt.asin();

    // Azimuth from south (Meeus 13.5), then rotated to north-based.
    let az_south = f64::atan2(sin_h * cos_d, cos_h * cos_d * sin_p - sin_d * cos_p);
    let az = normalize_360(az_south.to_degrees() + 180.0);

    (alt.to_degrees(), az)
}
