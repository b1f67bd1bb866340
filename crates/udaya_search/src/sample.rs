//! Altitude sampling over a time window.
//!
//! A [`SampleSeries`] walks a [`TimeAxis`] once, asking a [`PointSource`]
//! for the point's coordinates at each instant and the horizon projector for
//! its altitude. Provider failures surface as `Err` items so the caller can
//! treat them as gaps; the series itself never substitutes default values.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use udaya_core::{
    Body, GeoLocation, HorizonProjector, PositionFlags, PositionProvider, ProviderError,
    SkyCoords, normalize_360,
};

use crate::sensitive::DerivedPointResolver;
use crate::transit_types::{AltitudeKind, BodySampling, StepSize, sample_count};

/// One point of the altitude curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    /// Julian Date of the sample.
    pub jd: f64,
    /// Minutes since the window start.
    pub minute_offset: f64,
    /// Altitude in degrees [-90, 90].
    pub altitude_deg: f64,
    /// Ecliptic longitude of the point, degrees [0, 360).
    pub longitude_deg: f64,
    /// Coordinates that were projected to obtain `altitude_deg`.
    pub coords: SkyCoords,
}

/// Evenly spaced instants `start + i·step`, `i = 0..count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub start_jd: f64,
    pub step: StepSize,
    pub count: usize,
}

impl TimeAxis {
    /// Axis covering `[start_jd, start_jd + window_days]`.
    pub fn new(start_jd: f64, window_days: f64, step: StepSize) -> Self {
        Self {
            start_jd,
            step,
            count: sample_count(window_days, step),
        }
    }

    pub fn jd_at(&self, index: usize) -> f64 {
        self.start_jd + index as f64 * self.step.days()
    }

    pub fn minute_offset_at(&self, index: usize) -> f64 {
        index as f64 * self.step.minutes()
    }
}

/// Position of the searched point at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFix {
    /// Ecliptic longitude reported with the sample.
    pub longitude_deg: f64,
    /// Coordinates handed to the horizon projector.
    pub coords: SkyCoords,
}

/// Produces the searched point's coordinates at successive instants.
///
/// Calls arrive in strictly increasing `jd` order; sources may keep state
/// between calls.
pub trait PointSource {
    fn fix_at(&mut self, jd: f64) -> Result<PointFix, ProviderError>;
}

/// Last known state of an extrapolated body.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    jd: f64,
    longitude_deg: f64,
    latitude_deg: f64,
    speed_deg_per_day: f64,
    latitude_speed_deg_per_day: Option<f64>,
}

/// Real body, queried directly or extrapolated from one anchor query.
pub struct BodySource<'a, P> {
    provider: &'a P,
    body: Body,
    anchor: Option<Anchor>,
}

impl<'a, P: PositionProvider> BodySource<'a, P> {
    /// Create a source for `body`. In [`BodySampling::Extrapolate`] mode the
    /// anchor is queried at `start_jd` immediately; failure there has no
    /// fallback and is returned.
    pub fn new(
        provider: &'a P,
        body: Body,
        sampling: BodySampling,
        start_jd: f64,
    ) -> Result<Self, ProviderError> {
        let anchor = match sampling {
            BodySampling::Requery => None,
            BodySampling::Extrapolate => {
                let p = provider.position(start_jd, body, PositionFlags::with_speed())?;
                Some(Anchor {
                    jd: start_jd,
                    longitude_deg: p.longitude_deg,
                    latitude_deg: p.latitude_deg,
                    speed_deg_per_day: p.speed_deg_per_day,
                    latitude_speed_deg_per_day: p.latitude_speed_deg_per_day,
                })
            }
        };
        Ok(Self {
            provider,
            body,
            anchor,
        })
    }

    fn extrapolate(&mut self, jd: f64) -> Result<PointFix, ProviderError> {
        let Some(anchor) = self.anchor.as_mut() else {
            return Err(ProviderError::Computation("extrapolation without anchor"));
        };

        // The Moon's rate changes too fast to hold for a whole day: refresh it
        // each step and advance incrementally from the previous sample.
        if self.body == Body::Moon && jd != anchor.jd {
            let p = self
                .provider
                .position(jd, Body::Moon, PositionFlags::with_speed())?;
            anchor.speed_deg_per_day = p.speed_deg_per_day;
            anchor.latitude_speed_deg_per_day = p.latitude_speed_deg_per_day;
            let dt = jd - anchor.jd;
            anchor.longitude_deg = normalize_360(anchor.longitude_deg + anchor.speed_deg_per_day * dt);
            if let Some(lat_speed) = anchor.latitude_speed_deg_per_day {
                anchor.latitude_deg += lat_speed * dt;
            }
            anchor.jd = jd;
            return Ok(PointFix {
                longitude_deg: anchor.longitude_deg,
                coords: SkyCoords::ecliptic(anchor.longitude_deg, anchor.latitude_deg),
            });
        }

        let dt = jd - anchor.jd;
        let lon = normalize_360(anchor.longitude_deg + anchor.speed_deg_per_day * dt);
        let lat = match anchor.latitude_speed_deg_per_day {
            Some(lat_speed) => anchor.latitude_deg + lat_speed * dt,
            None => anchor.latitude_deg,
        };
        Ok(PointFix {
            longitude_deg: lon,
            coords: SkyCoords::ecliptic(lon, lat),
        })
    }
}

impl<P: PositionProvider> PointSource for BodySource<'_, P> {
    fn fix_at(&mut self, jd: f64) -> Result<PointFix, ProviderError> {
        if self.anchor.is_some() {
            return self.extrapolate(jd);
        }
        let p = self
            .provider
            .position(jd, self.body, PositionFlags::default())?;
        Ok(PointFix {
            longitude_deg: p.longitude_deg,
            coords: SkyCoords::ecliptic(p.longitude_deg, p.latitude_deg),
        })
    }
}

impl<P: PositionProvider> PointSource for DerivedPointResolver<'_, P> {
    fn fix_at(&mut self, jd: f64) -> Result<PointFix, ProviderError> {
        self.fix(jd)
    }
}

/// Horizon projector bound to one observer and one altitude kind.
pub struct Projection<'a, H> {
    pub horizon: &'a H,
    pub geo: &'a GeoLocation,
    pub altitude: AltitudeKind,
}

impl<H> Clone for Projection<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Projection<'_, H> {}

impl<'a, H: HorizonProjector> Projection<'a, H> {
    pub fn new(horizon: &'a H, geo: &'a GeoLocation, altitude: AltitudeKind) -> Self {
        Self {
            horizon,
            geo,
            altitude,
        }
    }

    /// Selected altitude of `coords` at `jd`.
    pub fn altitude_at(&self, jd: f64, coords: SkyCoords) -> Result<f64, ProviderError> {
        let pos = self.horizon.horizontal(jd, self.geo, coords)?;
        Ok(self.altitude.select(&pos))
    }
}

/// Lazy, finite, non-restartable altitude series over a [`TimeAxis`].
pub struct SampleSeries<'a, S, H> {
    axis: TimeAxis,
    next_index: usize,
    source: S,
    projection: Projection<'a, H>,
}

impl<'a, S: PointSource, H: HorizonProjector> SampleSeries<'a, S, H> {
    pub fn new(axis: TimeAxis, source: S, projection: Projection<'a, H>) -> Self {
        Self {
            axis,
            next_index: 0,
            source,
            projection,
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    fn sample(&mut self, index: usize) -> Result<TimeSample, ProviderError> {
        let jd = self.axis.jd_at(index);
        let fix = self.source.fix_at(jd)?;
        Ok(TimeSample {
            jd,
            minute_offset: self.axis.minute_offset_at(index),
            altitude_deg: self.projection.altitude_at(jd, fix.coords)?,
            longitude_deg: fix.longitude_deg,
            coords: fix.coords,
        })
    }
}

impl<S: PointSource, H: HorizonProjector> Iterator for SampleSeries<'_, S, H> {
    type Item = Result<TimeSample, ProviderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.axis.count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.sample(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.axis.count - self.next_index;
        (left, Some(left))
    }
}

impl<S: PointSource, H: HorizonProjector> ExactSizeIterator for SampleSeries<'_, S, H> {}

impl<S: PointSource, H: HorizonProjector> FusedIterator for SampleSeries<'_, S, H> {}

#[cfg(test)]
mod tests {
    use super::*;
    use udaya_core::{BodyPosition, HorizontalPosition, ReferencePoint};

    /// Body moving at a constant 1°/day from 100°, Moon at 13°/day.
    struct Linear;

    impl PositionProvider for Linear {
        fn position(
            &self,
            jd: f64,
            body: Body,
            flags: PositionFlags,
        ) -> Result<BodyPosition, ProviderError> {
            let speed = if body == Body::Moon { 13.0 } else { 1.0 };
            let lon = normalize_360(100.0 + speed * jd);
            Ok(BodyPosition {
                longitude_deg: lon,
                latitude_deg: 0.0,
                right_ascension_deg: lon,
                declination_deg: 0.0,
                speed_deg_per_day: if flags.with_speed { speed } else { 0.0 },
                latitude_speed_deg_per_day: None,
            })
        }

        fn ascendant(&self, _jd: f64, _geo: &GeoLocation) -> Result<ReferencePoint, ProviderError> {
            Err(ProviderError::Computation("not needed"))
        }
    }

    /// Altitude equals the target longitude minus 180, for easy checking.
    struct LonAsAltitude;

    impl HorizonProjector for LonAsAltitude {
        fn horizontal(
            &self,
            _jd: f64,
            _geo: &GeoLocation,
            coords: SkyCoords,
        ) -> Result<HorizontalPosition, ProviderError> {
            let alt = (coords.lon_deg - 180.0) / 2.0;
            Ok(HorizontalPosition {
                true_altitude_deg: alt,
                apparent_altitude_deg: alt + 0.5,
                azimuth_deg: 0.0,
            })
        }
    }

    fn geo() -> GeoLocation {
        GeoLocation::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn axis_covers_window_inclusive() {
        let axis = TimeAxis::new(10.0, 1.0, StepSize::DayFraction(4));
        assert_eq!(axis.count, 5);
        assert_eq!(axis.jd_at(4), 11.0);
        assert_eq!(axis.minute_offset_at(2), 720.0);
    }

    #[test]
    fn extrapolated_series_follows_speed() {
        let g = geo();
        let axis = TimeAxis::new(0.0, 1.0, StepSize::DayFraction(4));
        let src = BodySource::new(&Linear, Body::Sun, BodySampling::Extrapolate, 0.0).unwrap();
        let projection = Projection::new(&LonAsAltitude, &g, AltitudeKind::True);
        let samples: Vec<_> = SampleSeries::new(axis, src, projection)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(samples.len(), 5);
        assert!((samples[4].longitude_deg - 101.0).abs() < 1e-12);
        assert!(samples.windows(2).all(|w| w[0].jd < w[1].jd));
    }

    #[test]
    fn moon_extrapolation_matches_linear_motion() {
        let g = geo();
        let axis = TimeAxis::new(0.0, 1.0, StepSize::Minutes(60.0));
        let src = BodySource::new(&Linear, Body::Moon, BodySampling::Extrapolate, 0.0).unwrap();
        let projection = Projection::new(&LonAsAltitude, &g, AltitudeKind::True);
        let last = SampleSeries::new(axis, src, projection)
            .last()
            .unwrap()
            .unwrap();
        assert!((last.longitude_deg - 113.0).abs() < 1e-9, "{}", last.longitude_deg);
    }

    #[test]
    fn requery_matches_provider() {
        let g = geo();
        let axis = TimeAxis::new(2.0, 0.5, StepSize::DayFraction(2));
        let src = BodySource::new(&Linear, Body::Sun, BodySampling::Requery, 2.0).unwrap();
        let projection = Projection::new(&LonAsAltitude, &g, AltitudeKind::Apparent);
        let samples: Vec<_> = SampleSeries::new(axis, src, projection)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(samples.len(), 2);
        assert!((samples[1].longitude_deg - 102.5).abs() < 1e-12);
        assert!((samples[0].altitude_deg - ((102.0 - 180.0) / 2.0 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn series_is_not_restartable() {
        let g = geo();
        let axis = TimeAxis::new(0.0, 1.0, StepSize::DayFraction(2));
        let src = BodySource::new(&Linear, Body::Sun, BodySampling::Requery, 0.0).unwrap();
        let projection = Projection::new(&LonAsAltitude, &g, AltitudeKind::True);
        let mut series = SampleSeries::new(axis, src, projection);
        assert_eq!(series.len(), 3);
        assert_eq!(series.by_ref().count(), 3);
        assert!(series.next().is_none());
    }
}
