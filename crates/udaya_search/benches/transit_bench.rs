use criterion::{Criterion, black_box, criterion_group, criterion_main};
use udaya_core::{Body, GeoLocation, SensitivePoint};
use udaya_ephem::{AnalyticEphemeris, AnalyticHorizon};
use udaya_search::{
    BodySampling, DerivedPointRequest, TransitConfig, TransitTarget, search_body_transits,
    search_sensitive_transits, search_with_companion,
};

const JD: f64 = 2_460_310.5;

fn geo() -> GeoLocation {
    GeoLocation::new(28.61, 77.21, 216.0)
}

fn body_bench(c: &mut Criterion) {
    let horizon = AnalyticHorizon::default();
    let geo = geo();
    let extrapolate = TransitConfig::default();
    let requery = TransitConfig {
        body_sampling: BodySampling::Requery,
        ..Default::default()
    };

    let mut group = c.benchmark_group("body_transits");
    group.bench_function("sun_extrapolate", |b| {
        b.iter(|| {
            search_body_transits(
                black_box(&AnalyticEphemeris),
                &horizon,
                &geo,
                Body::Sun,
                black_box(JD),
                &extrapolate,
            )
            .expect("search should succeed")
        })
    });
    group.bench_function("moon_requery", |b| {
        b.iter(|| {
            search_body_transits(
                black_box(&AnalyticEphemeris),
                &horizon,
                &geo,
                Body::Moon,
                black_box(JD),
                &requery,
            )
            .expect("search should succeed")
        })
    });
    group.finish();
}

fn sensitive_bench(c: &mut Criterion) {
    let horizon = AnalyticHorizon::default();
    let geo = geo();
    let config = TransitConfig::default();
    let request = DerivedPointRequest::live(SensitivePoint::LotOfFortune);

    let mut group = c.benchmark_group("sensitive_transits");
    group.sample_size(20);
    group.bench_function("fortune_live", |b| {
        b.iter(|| {
            search_sensitive_transits(
                black_box(&AnalyticEphemeris),
                &horizon,
                &geo,
                &request,
                black_box(JD),
                &config,
            )
            .expect("search should succeed")
        })
    });
    group.finish();
}

fn batch_bench(c: &mut Criterion) {
    let horizon = AnalyticHorizon::default();
    let geo = geo();
    let config = TransitConfig::default();
    let targets = [
        TransitTarget::Body(Body::Sun),
        TransitTarget::Body(Body::Moon),
        TransitTarget::Sensitive(DerivedPointRequest::live(SensitivePoint::LotOfFortune)),
        TransitTarget::Sensitive(DerivedPointRequest::live(SensitivePoint::Yogi)),
    ];

    let mut group = c.benchmark_group("transit_batch");
    group.sample_size(10);
    group.bench_function("four_points_with_companion", |b| {
        b.iter(|| {
            search_with_companion(
                black_box(&AnalyticEphemeris),
                &horizon,
                &geo,
                &targets,
                black_box(JD),
                &config,
            )
            .expect("batch should succeed")
        })
    });
    group.finish();
}

criterion_group!(benches, body_bench, sensitive_bench, batch_bench);
criterion_main!(benches);
