//! Rise, set and culmination search for celestial bodies and derived
//! sensitive points.
//!
//! A search samples a point's altitude across a window, detects horizon
//! crossings and altitude extrema in one ordered fold, then refines them:
//! crossings by linear interpolation, extrema by grid search. Sensitive
//! points (Lots of Fortune and Spirit, Bhrigu Bindu, Yogi, Ava-Yogi) are
//! re-resolved from the Sun, Moon, mean node and Ascendant at every sample,
//! either with the live Ascendant or held to a birth Ascendant.
//!
//! Positions and horizon projection come from caller-supplied
//! [`PositionProvider`](udaya_core::PositionProvider) and
//! [`HorizonProjector`](udaya_core::HorizonProjector) implementations.

pub mod error;
pub mod refine;
pub mod sample;
pub mod sensitive;
pub mod tracker;
pub mod transit;
pub mod transit_types;

pub use error::SearchError;
pub use refine::{ExtremumKind, inner_bracket_search, interpolate_crossing, refine_extremum};
pub use sample::{
    BodySource, PointFix, PointSource, Projection, SampleSeries, TimeAxis, TimeSample,
};
pub use sensitive::{
    DerivedPointResolver, DerivedPosition, ReferenceBodies, derive_point, effective_formula,
};
pub use tracker::{CrossingBracket, ExtremumCandidate, Polarity, TrackerState, track};
pub use transit::{
    search_body_transits, search_sensitive_transits, search_transits, search_with_companion,
};
pub use transit_types::{
    AltitudeKind, AscendantFrame, BodySampling, CrossingEvent, CulminationEvent,
    DerivedPointRequest, PointTransits, StepSize, TransitBatch, TransitConfig, TransitEvent,
    TransitEventSet, TransitKind, TransitTarget,
};
