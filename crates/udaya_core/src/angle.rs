//! Degree wraparound helpers shared by every additive longitude formula.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Signed shortest arc from `from_deg` to `to_deg`, in (-180, +180].
///
/// Used to interpolate longitudes across the 0/360 seam.
pub fn signed_arc_deg(from_deg: f64, to_deg: f64) -> f64 {
    normalize_to_pm180(to_deg - from_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let r = normalize_360(-1e-18);
        assert!(r < 360.0, "got {r}");
    }

    #[test]
    fn pm180_edges() {
        assert!((normalize_to_pm180(180.0) - 180.0).abs() < 1e-12);
        assert!((normalize_to_pm180(-180.0) - 180.0).abs() < 1e-12);
        assert!((normalize_to_pm180(190.0) + 170.0).abs() < 1e-12);
    }

    #[test]
    fn arc_across_seam() {
        assert!((signed_arc_deg(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((signed_arc_deg(1.0, 359.0) + 2.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn normalized_range(deg in -1.0e6f64..1.0e6) {
            let r = normalize_360(deg);
            prop_assert!((0.0..360.0).contains(&r));
        }

        #[test]
        fn arc_is_consistent(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let arc = signed_arc_deg(a, b);
            prop_assert!(arc > -180.0 && arc <= 180.0);
            let back = normalize_360(a + arc);
            let diff = normalize_to_pm180(back - b).abs();
            prop_assert!(diff < 1e-9);
        }
    }
}
