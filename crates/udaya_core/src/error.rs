//! Errors reported by position and horizon providers.

use thiserror::Error;

use crate::body::Body;

/// Failure of a [`crate::PositionProvider`] or [`crate::HorizonProjector`]
/// for one instant.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The provider has no model for this body.
    #[error("unsupported body: {}", .0.name())]
    UnsupportedBody(Body),
    /// The Julian Date is not finite or outside the provider's range.
    #[error("invalid epoch: JD {0}")]
    InvalidEpoch(f64),
    /// A computation inside the provider failed.
    #[error("computation failed: {0}")]
    Computation(&'static str),
    /// Backend-specific failure (I/O, remote service, kernel lookup).
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}
