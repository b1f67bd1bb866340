//! Types for rise/set/culmination search: configuration, requests and results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use udaya_core::{Body, HorizontalPosition, PointKey, ReferencePoint, SensitivePoint};

use crate::error::SearchError;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Spacing of the coarse time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepSize {
    /// Fixed number of minutes.
    Minutes(f64),
    /// `1/n` of a day.
    DayFraction(u32),
}

impl StepSize {
    /// Step length in days.
    pub fn days(self) -> f64 {
        match self {
            Self::Minutes(m) => m / MINUTES_PER_DAY,
            Self::DayFraction(n) => 1.0 / f64::from(n),
        }
    }

    /// Step length in minutes.
    pub fn minutes(self) -> f64 {
        self.days() * MINUTES_PER_DAY
    }

    fn validate(self) -> Result<(), &'static str> {
        match self {
            Self::Minutes(m) if !m.is_finite() || m <= 0.0 => Err("step minutes must be positive"),
            Self::DayFraction(0) => Err("step day fraction must be > 0"),
            _ => Ok(()),
        }
    }
}

/// How a real body's longitude is produced at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodySampling {
    /// Query once at the window start and extrapolate with the body's speed.
    /// The Moon's speed is re-queried at every step.
    #[default]
    Extrapolate,
    /// Query the position provider at every step.
    Requery,
}

/// Which altitude drives crossing and extremum detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeKind {
    /// Geometric altitude.
    #[default]
    True,
    /// Altitude including refraction.
    Apparent,
}

impl AltitudeKind {
    pub fn select(self, pos: &HorizontalPosition) -> f64 {
        match self {
            Self::True => pos.true_altitude_deg,
            Self::Apparent => pos.apparent_altitude_deg,
        }
    }
}

/// Configuration for transit searches.
///
/// Deserializes with defaults for missing fields so it can be embedded in a
/// caller's configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    /// Coarse step for real bodies (default 5 minutes).
    pub body_step: StepSize,
    /// Window length for real bodies in days (default 1).
    pub body_window_days: f64,
    /// Coarse step for sensitive points (default 1/144 day).
    pub sensitive_step: StepSize,
    /// Window length for sensitive points in days (default 145/144, one
    /// step past a full day so events on the day boundary are bracketed).
    pub sensitive_window_days: f64,
    /// Real-body sampling strategy.
    pub body_sampling: BodySampling,
    /// Altitude used for detection.
    pub altitude: AltitudeKind,
    /// Resolution of the extremum grid search in minutes (default 0.25).
    pub fine_step_minutes: f64,
    /// Number of re-resolved samples in the sensitive-point inner search (default 48).
    pub inner_search_samples: u32,
    /// Offset of the companion window from the primary start, in days (default 0.5).
    pub companion_offset_days: f64,
    /// Upper bound on coarse samples in one window.
    pub max_samples_per_window: usize,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            body_step: StepSize::Minutes(5.0),
            body_window_days: 1.0,
            sensitive_step: StepSize::DayFraction(144),
            sensitive_window_days: 145.0 / 144.0,
            body_sampling: BodySampling::Extrapolate,
            altitude: AltitudeKind::True,
            fine_step_minutes: 0.25,
            inner_search_samples: 48,
            companion_offset_days: 0.5,
            max_samples_per_window: 10_000,
        }
    }
}

impl TransitConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        self.body_step.validate()?;
        self.sensitive_step.validate()?;
        for window in [self.body_window_days, self.sensitive_window_days] {
            if !window.is_finite() || window <= 0.0 {
                return Err("window length must be positive");
            }
        }
        if !self.fine_step_minutes.is_finite() || self.fine_step_minutes <= 0.0 {
            return Err("fine_step_minutes must be positive");
        }
        if self.inner_search_samples == 0 {
            return Err("inner_search_samples must be > 0");
        }
        if !self.companion_offset_days.is_finite() {
            return Err("companion_offset_days must be finite");
        }
        let limit = self.max_samples_per_window as f64;
        if samples_spanned(self.body_window_days, self.body_step) > limit
            || samples_spanned(self.sensitive_window_days, self.sensitive_step) > limit
        {
            return Err("window/step combination exceeds max_samples_per_window");
        }
        Ok(())
    }
}

/// Number of samples covering `[0, window]` inclusive of both ends when the
/// window is a whole number of steps.
pub(crate) fn sample_count(window_days: f64, step: StepSize) -> usize {
    // float-to-int casts saturate, the increment must too
    let steps = whole_steps(window_days, step) as usize;
    steps.saturating_add(1)
}

/// [`sample_count`] kept in `f64`, where tiny steps give huge or infinite
/// counts instead of overflowing.
fn samples_spanned(window_days: f64, step: StepSize) -> f64 {
    whole_steps(window_days, step) + 1.0
}

fn whole_steps(window_days: f64, step: StepSize) -> f64 {
    // Small epsilon so 1.0 / (1/144) lands on 144, not 143.999...
    (window_days / step.days() + 1e-9).floor()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Which Ascendant a sensitive-point formula uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AscendantFrame {
    /// The Ascendant at each sample instant.
    Live,
    /// The birth Ascendant, held constant across the series (transposed search).
    FixedTo(ReferencePoint),
}

/// Request to resolve and search one sensitive point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPointRequest {
    pub point: SensitivePoint,
    pub frame: AscendantFrame,
    /// Reference birth was at night: Fortune and Spirit swap formulas.
    pub night_birth: bool,
}

impl DerivedPointRequest {
    /// Live-frame, day-birth request.
    pub fn live(point: SensitivePoint) -> Self {
        Self {
            point,
            frame: AscendantFrame::Live,
            night_birth: false,
        }
    }

    /// Request holding the Ascendant at the birth value.
    pub fn transposed(point: SensitivePoint, birth_ascendant: ReferencePoint) -> Self {
        Self {
            point,
            frame: AscendantFrame::FixedTo(birth_ascendant),
            night_birth: false,
        }
    }

    pub fn with_night_birth(mut self, night_birth: bool) -> Self {
        self.night_birth = night_birth;
        self
    }
}

/// One entry of a batch search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransitTarget {
    Body(Body),
    Sensitive(DerivedPointRequest),
}

impl TransitTarget {
    pub fn key(&self) -> PointKey {
        match self {
            Self::Body(b) => PointKey::Body(*b),
            Self::Sensitive(r) => PointKey::Sensitive(r.point),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Horizon crossing obtained by linear interpolation between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    /// Julian Date of the crossing.
    pub jd: f64,
    /// Ecliptic longitude of the point at the crossing, degrees [0, 360).
    pub longitude_deg: f64,
    /// Carried through for callers; currently always `false`.
    pub after_reference: bool,
}

/// Culmination obtained by grid search around a coarse extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CulminationEvent {
    pub jd: f64,
    pub longitude_deg: f64,
    /// Altitude at the refined extremum, degrees.
    pub altitude_deg: f64,
    /// Carried through for callers; currently always `false`.
    pub after_reference: bool,
}

/// Event kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitKind {
    Rise,
    Set,
    Mc,
    Ic,
}

/// A single transit event, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransitEvent {
    Rise(CrossingEvent),
    Set(CrossingEvent),
    Mc(CulminationEvent),
    Ic(CulminationEvent),
}

impl TransitEvent {
    pub fn kind(&self) -> TransitKind {
        match self {
            Self::Rise(_) => TransitKind::Rise,
            Self::Set(_) => TransitKind::Set,
            Self::Mc(_) => TransitKind::Mc,
            Self::Ic(_) => TransitKind::Ic,
        }
    }

    pub fn jd(&self) -> f64 {
        match self {
            Self::Rise(e) | Self::Set(e) => e.jd,
            Self::Mc(e) | Self::Ic(e) => e.jd,
        }
    }

    pub fn longitude_deg(&self) -> f64 {
        match self {
            Self::Rise(e) | Self::Set(e) => e.longitude_deg,
            Self::Mc(e) | Self::Ic(e) => e.longitude_deg,
        }
    }
}

/// Rise/set/MC/IC of one point over one window. `None` means the event was
/// not found in the window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointTransits {
    pub rise: Option<CrossingEvent>,
    pub set: Option<CrossingEvent>,
    pub mc: Option<CulminationEvent>,
    pub ic: Option<CulminationEvent>,
    /// Coarse samples dropped because a provider failed at that instant.
    pub skipped_samples: usize,
}

impl PointTransits {
    /// Present events in chronological order.
    pub fn events(&self) -> Vec<TransitEvent> {
        let mut events: Vec<TransitEvent> = [
            self.rise.map(TransitEvent::Rise),
            self.set.map(TransitEvent::Set),
            self.mc.map(TransitEvent::Mc),
            self.ic.map(TransitEvent::Ic),
        ]
        .into_iter()
        .flatten()
        .collect();
        events.sort_by(|a, b| a.jd().total_cmp(&b.jd()));
        events
    }

    /// Whether provider gaps may have hidden or displaced events.
    pub fn is_partial(&self) -> bool {
        self.skipped_samples > 0
    }
}

/// Per-point outcomes of a batch. A failing point never hides its siblings.
///
/// Keyed by [`PointKey`]; two targets with the same key in one batch keep
/// the later one.
pub type TransitEventSet = BTreeMap<PointKey, Result<PointTransits, SearchError>>;

/// Primary window plus the companion window started `companion_offset_days` later.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitBatch {
    pub primary: TransitEventSet,
    pub companion: TransitEventSet,
}
