//! Mean lunar ascending node (Rahu).
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), Eq. 47.7:
//! `Ω = 125.0445479° − 1934.1362891° T + 0.0020754° T² + T³/467441 − T⁴/60616000`

use udaya_core::{jd_to_centuries, normalize_360};

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean Rahu ecliptic longitude in degrees [0, 360).
pub fn mean_rahu_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let t2 = t * t;
    normalize_360(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t2 * t / 467_441.0
            - t2 * t2 / 60_616_000.0,
    )
}

/// Mean Rahu longitude rate in degrees per day (always retrograde).
pub fn mean_rahu_speed_deg_per_day(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    let t2 = t * t;
    (-1_934.136_289_1 + 2.0 * 0.002_075_4 * t + 3.0 * t2 / 467_441.0
        - 4.0 * t2 * t / 60_616_000.0)
        / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;
    use udaya_core::J2000_JD;

    #[test]
    fn rahu_at_j2000() {
        assert!((mean_rahu_deg(J2000_JD) - 125.0445479).abs() < 1e-9);
    }

    #[test]
    fn rahu_is_retrograde() {
        let v = mean_rahu_speed_deg_per_day(J2000_JD);
        assert!((v + 0.052_953_8).abs() < 1e-6, "speed = {v}");
    }

    #[test]
    fn rahu_regresses_full_cycle() {
        // Nodal regression period ≈ 6798.4 days
        let a = mean_rahu_deg(J2000_JD);
        let b = mean_rahu_deg(J2000_JD + 6798.38);
        assert!(udaya_core::signed_arc_deg(a, b).abs() < 0.05);
    }
}
