//! Low-precision analytic implementations of the provider contracts.
//!
//! This crate provides:
//! - Sun longitude from the Astronomical Almanac low-precision series
//! - Moon longitude/latitude from its principal periodic terms
//! - Mean lunar node (Rahu)
//! - Ascendant from local sidereal time and obliquity
//! - [`AnalyticEphemeris`], a [`udaya_core::PositionProvider`]
//! - [`AnalyticHorizon`], a [`udaya_core::HorizonProjector`]
//!
//! Accuracy is of order 0.01° for the Sun and 0.3° for the Moon: enough to
//! exercise transit searches end to end, not a substitute for a kernel-based
//! ephemeris.

pub mod analytic;
pub mod horizon;
pub mod lagna;
pub mod moon;
pub mod node;
pub mod sun;

pub use analytic::AnalyticEphemeris;
pub use horizon::{AnalyticHorizon, saemundsson_refraction_deg};
pub use lagna::ascendant_longitude_deg;
pub use moon::{MoonState, moon_state};
pub use node::{mean_rahu_deg, mean_rahu_speed_deg_per_day};
pub use sun::{SunState, sun_state};
