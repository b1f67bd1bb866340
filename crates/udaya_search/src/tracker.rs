//! Rise/set/culmination detection over a sample series.
//!
//! Detection is an explicit fold: `samples.fold(TrackerState::new(), TrackerState::step)`.
//! The fold is order dependent; samples must arrive in time order.
//!
//! - A polarity change `−1 → +1` brackets a rise, `+1 → −1` a set. When the
//!   window holds several, the last one wins.
//! - MC/IC are the running strict maximum/minimum of altitude. Ties keep the
//!   earlier sample. Each candidate remembers the sample before it.

use crate::sample::TimeSample;

/// Sign of the altitude. Zero altitude counts as above the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Below,
    /// No sample seen yet.
    Unset,
    Above,
}

impl Polarity {
    pub fn of(altitude_deg: f64) -> Self {
        if altitude_deg >= 0.0 {
            Self::Above
        } else {
            Self::Below
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Self::Below => -1,
            Self::Unset => 0,
            Self::Above => 1,
        }
    }
}

/// Two consecutive samples straddling the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingBracket {
    pub before: TimeSample,
    pub after: TimeSample,
}

/// Coarse extremum with the sample that preceded it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumCandidate {
    pub sample: TimeSample,
    /// `None` when the extremum is the first sample of the window.
    pub predecessor: Option<TimeSample>,
}

/// Fold accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerState {
    polarity: Polarity,
    previous: Option<TimeSample>,
    rise: Option<CrossingBracket>,
    set: Option<CrossingBracket>,
    mc: Option<ExtremumCandidate>,
    ic: Option<ExtremumCandidate>,
    folded: usize,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            polarity: Polarity::Unset,
            previous: None,
            rise: None,
            set: None,
            mc: None,
            ic: None,
            folded: 0,
        }
    }

    /// Fold one sample into the state.
    pub fn step(self, sample: TimeSample) -> Self {
        let polarity = Polarity::of(sample.altitude_deg);
        let mut next = self;

        if let Some(before) = self.previous {
            let bracket = CrossingBracket {
                before,
                after: sample,
            };
            match (self.polarity, polarity) {
                (Polarity::Below, Polarity::Above) => next.rise = Some(bracket),
                (Polarity::Above, Polarity::Below) => next.set = Some(bracket),
                _ => {}
            }
        }

        let candidate = ExtremumCandidate {
            sample,
            predecessor: self.previous,
        };
        if self
            .mc
            .is_none_or(|m| sample.altitude_deg > m.sample.altitude_deg)
        {
            next.mc = Some(candidate);
        }
        if self
            .ic
            .is_none_or(|m| sample.altitude_deg < m.sample.altitude_deg)
        {
            next.ic = Some(candidate);
        }

        next.polarity = polarity;
        next.previous = Some(sample);
        next.folded += 1;
        next
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn previous(&self) -> Option<&TimeSample> {
        self.previous.as_ref()
    }

    pub fn rise(&self) -> Option<&CrossingBracket> {
        self.rise.as_ref()
    }

    pub fn set(&self) -> Option<&CrossingBracket> {
        self.set.as_ref()
    }

    pub fn mc(&self) -> Option<&ExtremumCandidate> {
        self.mc.as_ref()
    }

    pub fn ic(&self) -> Option<&ExtremumCandidate> {
        self.ic.as_ref()
    }

    /// Number of samples folded so far.
    pub fn folded(&self) -> usize {
        self.folded
    }
}

/// Fold a complete series.
pub fn track<I>(samples: I) -> TrackerState
where
    I: IntoIterator<Item = TimeSample>,
{
    samples
        .into_iter()
        .fold(TrackerState::new(), TrackerState::step)
}
