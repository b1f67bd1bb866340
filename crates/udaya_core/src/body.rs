//! Identifiers for searchable points: real bodies and sensitive points.

use serde::{Deserialize, Serialize};

/// Real bodies a [`crate::PositionProvider`] may be asked for.
///
/// `Rahu` is the mean ascending lunar node. It has no physical disc but is
/// queried like a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
}

impl Body {
    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
        }
    }
}

/// Sensitive points derived algebraically from Sun, Moon, Rahu and the Ascendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensitivePoint {
    /// Lot of Fortune (Pars Fortunae).
    LotOfFortune,
    /// Lot of Spirit (Pars Spiritus).
    LotOfSpirit,
    /// Bhrigu Bindu: midpoint of Moon and Rahu.
    BhriguBindu,
    /// Yogi point.
    Yogi,
    /// Ava-Yogi point.
    AvaYogi,
}

/// All sensitive points in declaration order.
pub const ALL_SENSITIVE_POINTS: [SensitivePoint; 5] = [
    SensitivePoint::LotOfFortune,
    SensitivePoint::LotOfSpirit,
    SensitivePoint::BhriguBindu,
    SensitivePoint::Yogi,
    SensitivePoint::AvaYogi,
];

impl SensitivePoint {
    /// Name of the sensitive point.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LotOfFortune => "Lot of Fortune",
            Self::LotOfSpirit => "Lot of Spirit",
            Self::BhriguBindu => "Bhrigu Bindu",
            Self::Yogi => "Yogi",
            Self::AvaYogi => "Ava-Yogi",
        }
    }

    /// Whether the point depends on the Ascendant (and hence on the frame).
    pub const fn uses_ascendant(self) -> bool {
        matches!(self, Self::LotOfFortune | Self::LotOfSpirit)
    }
}

/// Key under which search results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PointKey {
    Body(Body),
    Sensitive(SensitivePoint),
}

impl PointKey {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Body(b) => b.name(),
            Self::Sensitive(p) => p.name(),
        }
    }
}

impl From<Body> for PointKey {
    fn from(body: Body) -> Self {
        Self::Body(body)
    }
}

impl From<SensitivePoint> for PointKey {
    fn from(point: SensitivePoint) -> Self {
        Self::Sensitive(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_nonempty() {
        for p in ALL_SENSITIVE_POINTS {
            assert!(!p.name().is_empty());
        }
        assert_eq!(Body::Rahu.name(), "Rahu");
    }

    #[test]
    fn only_lots_use_ascendant() {
        let uses: Vec<_> = ALL_SENSITIVE_POINTS
            .iter()
            .filter(|p| p.uses_ascendant())
            .collect();
        assert_eq!(uses.len(), 2);
    }

    #[test]
    fn bodies_sort_before_sensitive_points() {
        let a = PointKey::from(Body::Saturn);
        let b = PointKey::from(SensitivePoint::LotOfFortune);
        assert!(a < b);
    }
}
