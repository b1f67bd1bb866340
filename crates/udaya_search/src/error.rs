//! Error types for transit search.

use thiserror::Error;
use udaya_core::ProviderError;

/// Errors from a transit search.
///
/// A missing event is not an error; it is reported as `None` in
/// [`crate::PointTransits`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A provider failed where no gap can be tolerated (e.g. the anchor
    /// query of an extrapolated series).
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// Caller input is unusable (non-finite JD, invalid location).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Search configuration is inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
