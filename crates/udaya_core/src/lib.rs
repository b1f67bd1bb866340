//! Shared types and provider contracts for horizon transit search.
//!
//! This crate provides:
//! - Angle normalization helpers (degree wraparound)
//! - Mean obliquity and ecliptic/equatorial/horizontal conversions
//! - Earth Rotation Angle, GMST and local sidereal time
//! - Body and sensitive-point identifiers
//! - The [`PositionProvider`] and [`HorizonProjector`] contracts that the
//!   search engine consumes, with their value types
//!
//! Nothing here performs I/O; providers are plugged in by the caller.

pub mod angle;
pub mod body;
pub mod error;
pub mod frames;
pub mod geo;
pub mod provider;
pub mod sidereal;

pub use angle::{normalize_360, normalize_to_pm180, signed_arc_deg};
pub use body::{ALL_SENSITIVE_POINTS, Body, PointKey, SensitivePoint};
pub use error::ProviderError;
pub use frames::{
    ecliptic_point_declination_deg, ecliptic_to_equatorial, equatorial_to_horizontal,
    longitude_to_right_ascension_deg, mean_obliquity_deg,
};
pub use geo::GeoLocation;
pub use provider::{
    BodyPosition, CoordinateFrame, HorizonProjector, HorizontalPosition, PositionFlags,
    PositionProvider, ReferencePoint, SkyCoords,
};
pub use sidereal::{
    J2000_JD, earth_rotation_angle_deg, gmst_deg, jd_to_centuries, local_sidereal_time_deg,
};
