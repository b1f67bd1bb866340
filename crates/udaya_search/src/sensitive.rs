//! Sensitive-point resolution.
//!
//! Every formula is applied twice, once to ecliptic longitudes and once to
//! right ascensions, and wrapped to [0, 360). The point is then treated as
//! lying on the ecliptic: its declination follows from its right ascension
//! (`tan δ = tan ε · sin α`).
//!
//! | point          | formula                    |
//! |----------------|----------------------------|
//! | Lot of Fortune | `asc + (moon − sun)`       |
//! | Lot of Spirit  | `asc + (sun − moon)`       |
//! | Bhrigu Bindu   | `(moon + rahu) / 2`        |
//! | Yogi           | `sun + moon + 93°20′`      |
//! | Ava-Yogi       | `Yogi + 186°40′`           |
//!
//! For a night birth the Fortune and Spirit formulas are exchanged.

use udaya_core::{
    Body, GeoLocation, PositionFlags, PositionProvider, ProviderError, ReferencePoint,
    SensitivePoint, SkyCoords, ecliptic_point_declination_deg, mean_obliquity_deg, normalize_360,
};

use crate::sample::PointFix;
use crate::transit_types::{AscendantFrame, DerivedPointRequest};

/// Offset of the Yogi point from the Sun + Moon sum: 93°20′.
pub const YOGI_OFFSET_DEG: f64 = 93.0 + 1.0 / 3.0;

/// Offset of Ava-Yogi from Yogi: 186°40′.
pub const AVA_YOGI_OFFSET_DEG: f64 = 560.0 / 3.0;

/// Reference bodies at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceBodies {
    pub sun: ReferencePoint,
    pub moon: ReferencePoint,
    pub rahu: ReferencePoint,
    pub ascendant: ReferencePoint,
}

/// Resolved sensitive point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPosition {
    pub longitude_deg: f64,
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
}

/// Formula actually applied to `point` after the day/night exchange.
pub fn effective_formula(point: SensitivePoint, night_birth: bool) -> SensitivePoint {
    match (point, night_birth) {
        (SensitivePoint::LotOfFortune, true) => SensitivePoint::LotOfSpirit,
        (SensitivePoint::LotOfSpirit, true) => SensitivePoint::LotOfFortune,
        (p, _) => p,
    }
}

/// Apply a point's formula to one angle system (longitude or right ascension).
pub fn formula_deg(formula: SensitivePoint, sun: f64, moon: f64, rahu: f64, asc: f64) -> f64 {
    let yogi = || sun + moon + YOGI_OFFSET_DEG;
    normalize_360(match formula {
        SensitivePoint::LotOfFortune => asc + (moon - sun),
        SensitivePoint::LotOfSpirit => asc + (sun - moon),
        SensitivePoint::BhriguBindu => (moon + rahu) / 2.0,
        SensitivePoint::Yogi => yogi(),
        SensitivePoint::AvaYogi => yogi() + AVA_YOGI_OFFSET_DEG,
    })
}

/// Longitude and right ascension of `point` for the given bodies.
pub fn derive_point(
    point: SensitivePoint,
    night_birth: bool,
    bodies: &ReferenceBodies,
) -> ReferencePoint {
    let f = effective_formula(point, night_birth);
    ReferencePoint {
        longitude_deg: formula_deg(
            f,
            bodies.sun.longitude_deg,
            bodies.moon.longitude_deg,
            bodies.rahu.longitude_deg,
            bodies.ascendant.longitude_deg,
        ),
        right_ascension_deg: formula_deg(
            f,
            bodies.sun.right_ascension_deg,
            bodies.moon.right_ascension_deg,
            bodies.rahu.right_ascension_deg,
            bodies.ascendant.right_ascension_deg,
        ),
    }
}

/// Resolves one sensitive point at arbitrary instants.
///
/// Holds no per-instant state: each call queries the provider afresh.
pub struct DerivedPointResolver<'a, P> {
    provider: &'a P,
    geo: GeoLocation,
    request: DerivedPointRequest,
}

impl<'a, P: PositionProvider> DerivedPointResolver<'a, P> {
    pub fn new(provider: &'a P, geo: GeoLocation, request: DerivedPointRequest) -> Self {
        Self {
            provider,
            geo,
            request,
        }
    }

    pub fn request(&self) -> &DerivedPointRequest {
        &self.request
    }

    /// Sun, Moon, Rahu and the frame's Ascendant at `jd`.
    pub fn reference_bodies(&self, jd: f64) -> Result<ReferenceBodies, ProviderError> {
        let query = |body| {
            self.provider
                .position(jd, body, PositionFlags::default())
                .map(|p| ReferencePoint::from(&p))
        };
        let ascendant = match self.request.frame {
            AscendantFrame::Live => self.provider.ascendant(jd, &self.geo)?,
            AscendantFrame::FixedTo(birth) => birth,
        };
        Ok(ReferenceBodies {
            sun: query(Body::Sun)?,
            moon: query(Body::Moon)?,
            rahu: query(Body::Rahu)?,
            ascendant,
        })
    }

    /// Resolve the point at `jd`.
    pub fn resolve(&self, jd: f64) -> Result<DerivedPosition, ProviderError> {
        let bodies = self.reference_bodies(jd)?;
        let p = derive_point(self.request.point, self.request.night_birth, &bodies);
        Ok(DerivedPosition {
            longitude_deg: p.longitude_deg,
            right_ascension_deg: p.right_ascension_deg,
            declination_deg: ecliptic_point_declination_deg(
                p.right_ascension_deg,
                mean_obliquity_deg(jd),
            ),
        })
    }

    /// Resolve the point at `jd` as equatorial coordinates for projection.
    pub fn fix(&self, jd: f64) -> Result<PointFix, ProviderError> {
        let d = self.resolve(jd)?;
        Ok(PointFix {
            longitude_deg: d.longitude_deg,
            coords: SkyCoords::equatorial(d.right_ascension_deg, d.declination_deg),
        })
    }
}
