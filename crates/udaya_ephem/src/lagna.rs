//! Ascendant (Lagna) from local sidereal time.
//!
//! With θ = LST (= RAMC), ε the obliquity and φ the latitude:
//!
//! `λ_asc = atan2(cos θ, −(sin θ cos ε + tan φ sin ε))`
//!
//! The quadrant of `atan2` places the result on the eastern horizon.
//! Undefined inside the polar circles when the ecliptic coincides with the
//! horizon; callers at |φ| ≥ 90° − ε get a best-effort value.

use udaya_core::normalize_360;

/// Ecliptic longitude of the Ascendant in degrees [0, 360).
pub fn ascendant_longitude_deg(lst_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let (sin_t, cos_t) = lst_deg.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity_deg.to_radians().sin_cos();
    let tan_p = latitude_deg.to_radians().tan();

    let asc = f64::atan2(cos_t, -(sin_t * cos_e + tan_p * sin_e));
    normalize_360(asc.to_degrees())
}
