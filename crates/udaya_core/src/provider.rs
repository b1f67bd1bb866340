//! Contracts for the external position and horizon collaborators.
//!
//! Both traits return a plain `Result`: success values never travel through
//! the error channel. Implementations must be deterministic for identical
//! inputs; the search engine relies on that for reproducible output.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::ProviderError;
use crate::geo::GeoLocation;

/// Coordinate system of a [`SkyCoords`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateFrame {
    /// `lon_deg` is ecliptic longitude, `lat_deg` ecliptic latitude.
    Ecliptic,
    /// `lon_deg` is right ascension, `lat_deg` declination.
    Equatorial,
}

/// A direction on the celestial sphere in a stated frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoords {
    pub frame: CoordinateFrame,
    /// Longitude-like angle in degrees [0, 360).
    pub lon_deg: f64,
    /// Latitude-like angle in degrees [-90, 90].
    pub lat_deg: f64,
}

impl SkyCoords {
    pub fn ecliptic(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            frame: CoordinateFrame::Ecliptic,
            lon_deg,
            lat_deg,
        }
    }

    pub fn equatorial(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            frame: CoordinateFrame::Equatorial,
            lon_deg: ra_deg,
            lat_deg: dec_deg,
        }
    }
}

/// Options passed through to the position provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionFlags {
    /// Request longitude/latitude rates. Providers may report zero speed
    /// when this is false.
    pub with_speed: bool,
}

impl PositionFlags {
    pub const fn with_speed() -> Self {
        Self { with_speed: true }
    }
}

/// Geocentric position of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Right ascension in degrees [0, 360).
    pub right_ascension_deg: f64,
    /// Declination in degrees.
    pub declination_deg: f64,
    /// Longitude rate in degrees per day.
    pub speed_deg_per_day: f64,
    /// Latitude rate in degrees per day, when the provider knows it.
    pub latitude_speed_deg_per_day: Option<f64>,
}

/// A point on the ecliptic described by longitude and right ascension.
///
/// Used for the Ascendant and as the reference-body shape consumed by
/// sensitive-point formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub longitude_deg: f64,
    pub right_ascension_deg: f64,
}

impl From<&BodyPosition> for ReferencePoint {
    fn from(p: &BodyPosition) -> Self {
        Self {
            longitude_deg: p.longitude_deg,
            right_ascension_deg: p.right_ascension_deg,
        }
    }
}

/// Horizontal coordinates seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    /// Geometric altitude in degrees [-90, 90].
    pub true_altitude_deg: f64,
    /// Altitude including atmospheric refraction.
    pub apparent_altitude_deg: f64,
    /// Azimuth from north through east in degrees [0, 360).
    pub azimuth_deg: f64,
}

/// Source of body positions.
pub trait PositionProvider: Sync {
    /// Position of `body` at Julian Date `jd`.
    fn position(
        &self,
        jd: f64,
        body: Body,
        flags: PositionFlags,
    ) -> Result<BodyPosition, ProviderError>;

    /// Ascendant (ecliptic point rising in the east) for `geo` at `jd`.
    fn ascendant(&self, jd: f64, geo: &GeoLocation) -> Result<ReferencePoint, ProviderError>;
}

/// Converter from sky coordinates to an observer's horizon.
pub trait HorizonProjector: Sync {
    fn horizontal(
        &self,
        jd: f64,
        geo: &GeoLocation,
        coords: SkyCoords,
    ) -> Result<HorizontalPosition, ProviderError>;
}
