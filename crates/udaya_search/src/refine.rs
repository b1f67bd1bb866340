//! Refinement of coarse events.
//!
//! Crossings are interpolated linearly between the bracketing samples in a
//! single pass. Extrema are refined by a grid search at the candidate's
//! fixed sky coordinates, seeded with the candidate so the result is never
//! worse than the coarse sample. Sensitive points move fast enough under a
//! live Ascendant that an inner search re-resolving the point runs first.

use tracing::trace;
use udaya_core::{
    HorizonProjector, PositionProvider, ProviderError, normalize_360, signed_arc_deg,
};

use crate::sample::{Projection, TimeSample};
use crate::sensitive::DerivedPointResolver;
use crate::tracker::CrossingBracket;
use crate::transit_types::{CrossingEvent, CulminationEvent};

const MINUTES_PER_DAY: f64 = 1440.0;

/// Which extremum a refinement looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    /// Upper culmination.
    Max,
    /// Lower culmination.
    Min,
}

impl ExtremumKind {
    /// Strict improvement test; ties keep the incumbent.
    fn improves(self, candidate: f64, best: f64) -> bool {
        match self {
            Self::Max => candidate > best,
            Self::Min => candidate < best,
        }
    }
}

/// Interpolate the horizon crossing inside a bracket.
///
/// `progress = |a| / |a − b|` measured back from the later sample, so the
/// formula serves rises and sets alike.
pub fn interpolate_crossing(bracket: &CrossingBracket) -> CrossingEvent {
    let prev = &bracket.before;
    let curr = &bracket.after;
    let progress = curr.altitude_deg.abs() / (curr.altitude_deg - prev.altitude_deg).abs();
    let jd = curr.jd - progress * (curr.jd - prev.jd);
    let arc = signed_arc_deg(prev.longitude_deg, curr.longitude_deg);
    CrossingEvent {
        jd,
        longitude_deg: normalize_360(curr.longitude_deg - progress * arc),
        after_reference: false,
    }
}

/// Grid search `±window_minutes` around `candidate` at `fine_step_minutes`
/// resolution, holding the candidate's coordinates fixed.
pub fn refine_extremum<H: HorizonProjector>(
    projection: &Projection<'_, H>,
    candidate: &TimeSample,
    window_minutes: f64,
    fine_step_minutes: f64,
    kind: ExtremumKind,
) -> Result<CulminationEvent, ProviderError> {
    let n_half = (window_minutes / fine_step_minutes).round() as i64;
    let fine_days = fine_step_minutes / MINUTES_PER_DAY;

    let mut best_jd = candidate.jd;
    let mut best_alt = candidate.altitude_deg;
    for i in -n_half..=n_half {
        if i == 0 {
            continue;
        }
        let jd = candidate.jd + i as f64 * fine_days;
        let alt = projection.altitude_at(jd, candidate.coords)?;
        if kind.improves(alt, best_alt) {
            best_jd = jd;
            best_alt = alt;
        }
    }

    trace!(
        ?kind,
        coarse_jd = candidate.jd,
        refined_jd = best_jd,
        altitude_deg = best_alt,
        "extremum refined"
    );
    Ok(CulminationEvent {
        jd: best_jd,
        longitude_deg: candidate.longitude_deg,
        altitude_deg: best_alt,
        after_reference: false,
    })
}

/// Re-resolve a sensitive point at `samples` instants evenly spanning
/// `[candidate − step_days, candidate + step_days)` and return the best
/// sample, seeded with `candidate`.
pub fn inner_bracket_search<P: PositionProvider, H: HorizonProjector>(
    resolver: &DerivedPointResolver<'_, P>,
    projection: &Projection<'_, H>,
    candidate: &TimeSample,
    step_days: f64,
    samples: u32,
    kind: ExtremumKind,
) -> Result<TimeSample, ProviderError> {
    let inner_step = inner_step_days(step_days, samples);
    let start = candidate.jd - step_days;

    let mut best = *candidate;
    for i in 0..samples {
        let jd = start + f64::from(i) * inner_step;
        let fix = resolver.fix(jd)?;
        let alt = projection.altitude_at(jd, fix.coords)?;
        if kind.improves(alt, best.altitude_deg) {
            best = TimeSample {
                jd,
                minute_offset: candidate.minute_offset + (jd - candidate.jd) * MINUTES_PER_DAY,
                altitude_deg: alt,
                longitude_deg: fix.longitude_deg,
                coords: fix.coords,
            };
        }
    }
    trace!(
        ?kind,
        coarse_jd = candidate.jd,
        inner_jd = best.jd,
        "inner bracket search"
    );
    Ok(best)
}

/// Spacing of the inner bracket search in days.
pub fn inner_step_days(step_days: f64, samples: u32) -> f64 {
    2.0 * step_days / f64::from(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use udaya_core::{
        Body, BodyPosition, GeoLocation, HorizontalPosition, PositionFlags, ReferencePoint,
        SensitivePoint, SkyCoords,
    };

    use crate::transit_types::{AltitudeKind, DerivedPointRequest};

    fn sample(jd: f64, alt: f64, lon: f64) -> TimeSample {
        TimeSample {
            jd,
            minute_offset: 0.0,
            altitude_deg: alt,
            longitude_deg: lon,
            coords: SkyCoords::ecliptic(lon, 0.0),
        }
    }

    #[test]
    fn rise_interpolation_is_linear() {
        let b = CrossingBracket {
            before: sample(10.0, -1.0, 20.0),
            after: sample(10.1, 3.0, 24.0),
        };
        let e = interpolate_crossing(&b);
        assert_abs_diff_eq!(e.jd, 10.025, epsilon = 1e-12);
        assert_abs_diff_eq!(e.longitude_deg, 21.0, epsilon = 1e-12);
        assert!(!e.after_reference);
    }

    #[test]
    fn set_interpolation_is_linear() {
        let b = CrossingBracket {
            before: sample(10.0, 2.0, 0.0),
            after: sample(10.1, -2.0, 0.0),
        };
        let e = interpolate_crossing(&b);
        assert_abs_diff_eq!(e.jd, 10.05, epsilon = 1e-12);
    }

    #[test]
    fn crossing_longitude_takes_short_arc() {
        let b = CrossingBracket {
            before: sample(0.0, -1.0, 359.0),
            after: sample(1.0, 1.0, 3.0),
        };
        let e = interpolate_crossing(&b);
        assert_abs_diff_eq!(e.longitude_deg, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_at_exact_zero() {
        let b = CrossingBracket {
            before: sample(0.0, -1.0, 0.0),
            after: sample(1.0, 0.0, 0.0),
        };
        assert_eq!(interpolate_crossing(&b).jd, 1.0);
    }

    /// Altitude peaks at `peak_jd` regardless of coordinates.
    struct Parabola {
        peak_jd: f64,
    }

    impl HorizonProjector for Parabola {
        fn horizontal(
            &self,
            jd: f64,
            _geo: &GeoLocation,
            _coords: SkyCoords,
        ) -> Result<HorizontalPosition, ProviderError> {
            let dt_min = (jd - self.peak_jd) * MINUTES_PER_DAY;
            let alt = 40.0 - 0.001 * dt_min * dt_min;
            Ok(HorizontalPosition {
                true_altitude_deg: alt,
                apparent_altitude_deg: alt,
                azimuth_deg: 180.0,
            })
        }
    }

    #[test]
    fn grid_search_finds_peak() {
        let h = Parabola {
            peak_jd: 100.0 + 2.0 / MINUTES_PER_DAY,
        };
        let geo = GeoLocation::new(0.0, 0.0, 0.0);
        let cand = sample(100.0, 40.0 - 0.004, 0.0);
        let projection = Projection::new(&h, &geo, AltitudeKind::True);
        let e = refine_extremum(&projection, &cand, 5.0, 0.25, ExtremumKind::Max).unwrap();
        assert_abs_diff_eq!(e.jd, h.peak_jd, epsilon = 1e-9);
        assert_abs_diff_eq!(e.altitude_deg, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn grid_search_never_worsens_seed() {
        let h = Parabola { peak_jd: 100.0 };
        let geo = GeoLocation::new(0.0, 0.0, 0.0);
        // seed already better than anything the projector can return
        let cand = sample(100.0, 99.0, 0.0);
        let projection = Projection::new(&h, &geo, AltitudeKind::True);
        let e = refine_extremum(&projection, &cand, 5.0, 0.25, ExtremumKind::Max).unwrap();
        assert_eq!(e.jd, 100.0);
        assert_eq!(e.altitude_deg, 99.0);
    }

    #[test]
    fn grid_search_min() {
        let h = Parabola {
            peak_jd: 100.0 + 0.1 / MINUTES_PER_DAY,
        };
        let geo = GeoLocation::new(0.0, 0.0, 0.0);
        let cand = sample(100.0, 40.0, 0.0);
        let projection = Projection::new(&h, &geo, AltitudeKind::True);
        let e = refine_extremum(&projection, &cand, 1.0, 0.25, ExtremumKind::Min).unwrap();
        // lowest point is the grid end farthest from the peak
        assert_abs_diff_eq!(e.jd, 100.0 - 1.0 / MINUTES_PER_DAY, epsilon = 1e-12);
        assert!(e.altitude_deg < 40.0);
    }

    /// Records every instant it is asked about.
    #[derive(Default)]
    struct Recorder {
        calls: AtomicUsize,
        instants: Mutex<Vec<f64>>,
    }

    impl HorizonProjector for Recorder {
        fn horizontal(
            &self,
            jd: f64,
            _geo: &GeoLocation,
            _coords: SkyCoords,
        ) -> Result<HorizontalPosition, ProviderError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if let Ok(mut v) = self.instants.lock() {
                v.push(jd);
            }
            Ok(HorizontalPosition {
                true_altitude_deg: 0.0,
                apparent_altitude_deg: 0.0,
                azimuth_deg: 0.0,
            })
        }
    }

    #[test]
    fn grid_spans_the_whole_window() {
        let h = Recorder::default();
        let geo = GeoLocation::new(0.0, 0.0, 0.0);
        let cand = sample(100.0, 10.0, 0.0);
        let projection = Projection::new(&h, &geo, AltitudeKind::True);
        refine_extremum(&projection, &cand, 10.0, 0.25, ExtremumKind::Max).unwrap();

        // 40 points either side, the seed itself is not re-queried
        assert_eq!(h.calls.load(Ordering::Relaxed), 80);
        let instants = h.instants.lock().unwrap();
        let lo = instants.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = instants.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_abs_diff_eq!((cand.jd - lo) * MINUTES_PER_DAY, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!((hi - cand.jd) * MINUTES_PER_DAY, 10.0, epsilon = 1e-6);
    }

    /// Sun fixed at 0, Moon moving 100°/day from 50° at jd 10.
    struct Sweep;

    impl PositionProvider for Sweep {
        fn position(
            &self,
            jd: f64,
            body: Body,
            _flags: PositionFlags,
        ) -> Result<BodyPosition, ProviderError> {
            let lon = match body {
                Body::Moon => 50.0 + 100.0 * (jd - 10.0),
                _ => 0.0,
            };
            Ok(BodyPosition {
                longitude_deg: lon,
                latitude_deg: 0.0,
                right_ascension_deg: lon,
                declination_deg: 0.0,
                speed_deg_per_day: 0.0,
                latitude_speed_deg_per_day: None,
            })
        }

        fn ascendant(&self, _jd: f64, _geo: &GeoLocation) -> Result<ReferencePoint, ProviderError> {
            Ok(ReferencePoint {
                longitude_deg: 0.0,
                right_ascension_deg: 0.0,
            })
        }
    }

    /// Altitude peaks where the projected right ascension is `peak_ra`.
    struct RaPeak {
        peak_ra: f64,
    }

    impl HorizonProjector for RaPeak {
        fn horizontal(
            &self,
            _jd: f64,
            _geo: &GeoLocation,
            coords: SkyCoords,
        ) -> Result<HorizontalPosition, ProviderError> {
            let d = coords.lon_deg - self.peak_ra;
            let alt = 30.0 - d * d;
            Ok(HorizontalPosition {
                true_altitude_deg: alt,
                apparent_altitude_deg: alt,
                azimuth_deg: 0.0,
            })
        }
    }

    #[test]
    fn inner_search_re_resolves_point() {
        let geo = GeoLocation::new(0.0, 0.0, 0.0);
        let resolver = DerivedPointResolver::new(
            &Sweep,
            geo,
            DerivedPointRequest::live(SensitivePoint::Yogi),
        );
        // Yogi = moon + 93°20′; peak where moon = 50.5, i.e. jd 10.005
        let h = RaPeak {
            peak_ra: 50.5 + 93.0 + 1.0 / 3.0,
        };
        let cand = TimeSample {
            jd: 10.0,
            minute_offset: 0.0,
            altitude_deg: 30.0 - 0.25,
            longitude_deg: 143.333,
            coords: SkyCoords::equatorial(143.333, 0.0),
        };
        let projection = Projection::new(&h, &geo, AltitudeKind::True);
        let best = inner_bracket_search(
            &resolver,
            &projection,
            &cand,
            0.01,
            48,
            ExtremumKind::Max,
        )
        .unwrap();
        assert_abs_diff_eq!(best.jd, 10.005, epsilon = 1e-9);
        assert_abs_diff_eq!(best.minute_offset, 7.2, epsilon = 1e-6);
        assert!(best.altitude_deg > cand.altitude_deg);
    }

    #[test]
    fn inner_step_spans_twice_the_gap() {
        assert_abs_diff_eq!(inner_step_days(1.0 / 144.0, 48), 1.0 / 3456.0, epsilon = 1e-15);
    }
}
