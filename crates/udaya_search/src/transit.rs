//! Transit search engine.
//!
//! Each point search samples one window, folds the samples through the
//! tracker, then refines what the tracker found:
//! - rise/set by linear interpolation inside the bracket;
//! - MC/IC by a fixed-coordinate grid search, preceded for sensitive points
//!   by an inner search that re-resolves the point around the candidate.
//!
//! Samples the providers cannot produce are skipped and counted. Refinement
//! failures fall back to the coarse candidate. Neither ever yields a
//! zero-valued event.

use tracing::{debug, warn};
use udaya_core::{
    Body, GeoLocation, HorizonProjector, PointKey, PositionProvider, ProviderError,
};

use crate::error::SearchError;
use crate::refine::{ExtremumKind, inner_bracket_search, interpolate_crossing, refine_extremum};
use crate::sample::{BodySource, Projection, SampleSeries, TimeAxis, TimeSample};
use crate::sensitive::DerivedPointResolver;
use crate::tracker::{ExtremumCandidate, TrackerState};
use crate::transit_types::{
    AscendantFrame, CulminationEvent, DerivedPointRequest, PointTransits, TransitBatch,
    TransitConfig, TransitEventSet, TransitTarget,
};

const MINUTES_PER_DAY: f64 = 1440.0;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_inputs(
    jd_start: f64,
    geo: &GeoLocation,
    config: &TransitConfig,
) -> Result<(), SearchError> {
    if !jd_start.is_finite() {
        return Err(SearchError::InvalidInput("jd_start must be finite"));
    }
    geo.validate().map_err(SearchError::InvalidInput)?;
    config.validate().map_err(SearchError::InvalidConfig)?;
    Ok(())
}

fn validate_request(request: &DerivedPointRequest) -> Result<(), SearchError> {
    if let AscendantFrame::FixedTo(asc) = request.frame {
        if !asc.longitude_deg.is_finite() || !asc.right_ascension_deg.is_finite() {
            return Err(SearchError::InvalidInput("fixed ascendant must be finite"));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared pass
// ---------------------------------------------------------------------------

/// Fold a series, skipping failed samples. Fails only when no sample at all
/// could be produced.
fn fold_series<I>(key: PointKey, series: I) -> Result<(TrackerState, usize), SearchError>
where
    I: Iterator<Item = Result<TimeSample, ProviderError>>,
{
    let mut skipped = 0usize;
    let mut first_error: Option<ProviderError> = None;
    let state = series.fold(TrackerState::new(), |state, item| match item {
        Ok(sample) => state.step(sample),
        Err(e) => {
            warn!(point = key.name(), error = %e, "skipping sample");
            skipped += 1;
            first_error.get_or_insert(e);
            state
        }
    });

    match first_error {
        Some(e) if state.folded() == 0 => Err(e.into()),
        _ => Ok((state, skipped)),
    }
}

fn coarse_culmination(sample: &TimeSample) -> CulminationEvent {
    CulminationEvent {
        jd: sample.jd,
        longitude_deg: sample.longitude_deg,
        altitude_deg: sample.altitude_deg,
        after_reference: false,
    }
}

/// Turn tracker output into events, refining extrema with `refine`.
fn collect_transits<F>(
    key: PointKey,
    state: &TrackerState,
    skipped: usize,
    mut refine: F,
) -> PointTransits
where
    F: FnMut(&ExtremumCandidate, ExtremumKind) -> Result<CulminationEvent, ProviderError>,
{
    let mut culminate = |candidate: Option<&ExtremumCandidate>, kind: ExtremumKind| {
        candidate.map(|c| match refine(c, kind) {
            Ok(event) => event,
            Err(e) => {
                warn!(point = key.name(), ?kind, error = %e, "refinement failed, keeping coarse extremum");
                coarse_culmination(&c.sample)
            }
        })
    };

    let transits = PointTransits {
        rise: state.rise().map(interpolate_crossing),
        set: state.set().map(interpolate_crossing),
        mc: culminate(state.mc(), ExtremumKind::Max),
        ic: culminate(state.ic(), ExtremumKind::Min),
        skipped_samples: skipped,
    };

    debug!(
        point = key.name(),
        samples = state.folded(),
        skipped,
        rise = transits.rise.is_some(),
        set = transits.set.is_some(),
        mc = transits.mc.is_some(),
        ic = transits.ic.is_some(),
        "transit search finished"
    );
    transits
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rise, set, MC and IC of a real body over one window from `jd_start`.
///
/// In [`crate::BodySampling::Extrapolate`] mode the body is queried once at
/// `jd_start`; if that query fails the search fails.
pub fn search_body_transits<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    body: Body,
    jd_start: f64,
    config: &TransitConfig,
) -> Result<PointTransits, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    validate_inputs(jd_start, geo, config)?;
    body_pass(positions, horizon, geo, body, jd_start, config)
}

/// Rise, set, MC and IC of a sensitive point over one window from `jd_start`.
pub fn search_sensitive_transits<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    request: &DerivedPointRequest,
    jd_start: f64,
    config: &TransitConfig,
) -> Result<PointTransits, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    validate_inputs(jd_start, geo, config)?;
    sensitive_pass(positions, horizon, geo, request, jd_start, config)
}

/// Search every target over one window.
///
/// Targets are independent: one target's failure is recorded under its key
/// and never affects the others. Invalid shared inputs fail the whole batch.
pub fn search_transits<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    targets: &[TransitTarget],
    jd_start: f64,
    config: &TransitConfig,
) -> Result<TransitEventSet, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    validate_inputs(jd_start, geo, config)?;
    Ok(batch_pass(positions, horizon, geo, targets, jd_start, config))
}

/// Search every target over the primary window and over the companion
/// window starting `config.companion_offset_days` later.
pub fn search_with_companion<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    targets: &[TransitTarget],
    jd_start: f64,
    config: &TransitConfig,
) -> Result<TransitBatch, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    validate_inputs(jd_start, geo, config)?;
    let companion_start = jd_start + config.companion_offset_days;
    Ok(TransitBatch {
        primary: batch_pass(positions, horizon, geo, targets, jd_start, config),
        companion: batch_pass(positions, horizon, geo, targets, companion_start, config),
    })
}

// ---------------------------------------------------------------------------
// Passes (inputs already validated)
// ---------------------------------------------------------------------------

fn batch_pass<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    targets: &[TransitTarget],
    jd_start: f64,
    config: &TransitConfig,
) -> TransitEventSet
where
    P: PositionProvider,
    H: HorizonProjector,
{
    targets
        .iter()
        .map(|target| {
            let result = match target {
                TransitTarget::Body(body) => {
                    body_pass(positions, horizon, geo, *body, jd_start, config)
                }
                TransitTarget::Sensitive(request) => {
                    sensitive_pass(positions, horizon, geo, request, jd_start, config)
                }
            };
            if let Err(e) = &result {
                warn!(point = target.key().name(), error = %e, "point search failed");
            }
            (target.key(), result)
        })
        .collect()
}

fn body_pass<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    body: Body,
    jd_start: f64,
    config: &TransitConfig,
) -> Result<PointTransits, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    let key = PointKey::Body(body);
    let axis = TimeAxis::new(jd_start, config.body_window_days, config.body_step);
    let source = BodySource::new(positions, body, config.body_sampling, jd_start)?;
    let projection = Projection::new(horizon, geo, config.altitude);
    let series = SampleSeries::new(axis, source, projection);
    let (state, skipped) = fold_series(key, series)?;

    let window_minutes = config.body_step.minutes();
    Ok(collect_transits(key, &state, skipped, |c, kind| {
        refine_extremum(
            &projection,
            &c.sample,
            window_minutes,
            config.fine_step_minutes,
            kind,
        )
    }))
}

fn sensitive_pass<P, H>(
    positions: &P,
    horizon: &H,
    geo: &GeoLocation,
    request: &DerivedPointRequest,
    jd_start: f64,
    config: &TransitConfig,
) -> Result<PointTransits, SearchError>
where
    P: PositionProvider,
    H: HorizonProjector,
{
    validate_request(request)?;
    let key = PointKey::Sensitive(request.point);
    let axis = TimeAxis::new(jd_start, config.sensitive_window_days, config.sensitive_step);
    let projection = Projection::new(horizon, geo, config.altitude);
    let series = SampleSeries::new(
        axis,
        DerivedPointResolver::new(positions, *geo, *request),
        projection,
    );
    let (state, skipped) = fold_series(key, series)?;

    let resolver = DerivedPointResolver::new(positions, *geo, *request);
    let step_days = config.sensitive_step.days();
    let samples = config.inner_search_samples;
    Ok(collect_transits(key, &state, skipped, |c, kind| {
        // Both stages span ±gap to the predecessor; it exceeds the step
        // when samples were skipped.
        let gap = c.predecessor.map_or(step_days, |p| c.sample.jd - p.jd);
        let seed = inner_bracket_search(&resolver, &projection, &c.sample, gap, samples, kind)?;
        refine_extremum(
            &projection,
            &seed,
            gap * MINUTES_PER_DAY,
            config.fine_step_minutes,
            kind,
        )
    }))
}
