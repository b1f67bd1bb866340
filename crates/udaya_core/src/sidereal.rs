//! Earth Rotation Angle, Greenwich Mean Sidereal Time and local sidereal time.
//!
//! All functions take a Julian Date on the UT axis. The difference between
//! UTC and UT1 (< 0.9 s) is below the resolution of the transit search, so
//! callers pass their UTC Julian Date directly.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use crate::angle::normalize_360;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Earth Rotation Angle in degrees [0, 360).
///
/// θ = 360° × (0.7790572732640 + 1.00273781191135448 × Du),
/// Du = JD − 2451545.0.
pub fn earth_rotation_angle_deg(jd: f64) -> f64 {
    let du = jd - J2000_JD;
    // Split the integer day out first; the fractional rotation carries the precision.
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract();
    normalize_360(360.0 * turns.fract())
}

/// Greenwich Mean Sidereal Time in degrees [0, 360).
///
/// GMST = ERA + polynomial(T), polynomial in arcseconds:
///   0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
///   − 0.000029956·T⁴ − 0.0000000368·T⁵
pub fn gmst_deg(jd: f64) -> f64 {
    let era = earth_rotation_angle_deg(jd);
    let t = jd_to_centuries(jd);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    normalize_360(era + poly_arcsec / 3600.0)
}

/// Local sidereal time in degrees [0, 360) for an east-positive longitude.
pub fn local_sidereal_time_deg(jd: f64, longitude_east_deg: f64) -> f64 {
    normalize_360(gmst_deg(jd) + longitude_east_deg)
}
