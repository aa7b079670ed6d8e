use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use qsogeo::{
    adif::AdifRecord,
    config::EnrichConfig,
    core::{
        distance::{DistanceCalculator, EllipsoidalArc, Haversine},
        locator::decode,
    },
    engine::enricher::Enricher,
    qso::ContactRecord,
    summit::{StaticSummitTable, SummitLocation},
};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQR";

fn locator(i: usize) -> String {
    let a = LETTERS[i % 18] as char;
    let b = LETTERS[(i / 18) % 18] as char;
    let d1 = (i % 10) as u8;
    let d2 = ((i / 10) % 10) as u8;
    format!("{a}{b}{d1}{d2}")
}

fn contacts(n: usize) -> Vec<ContactRecord> {
    (0..n)
        .map(|i| {
            let mut rec = AdifRecord::new()
                .with("MY_GRIDSQUARE", "JN36")
                .with("CALL", format!("K{i}AA"))
                .with("BAND", "20m");
            if i % 5 == 0 {
                rec.insert("SOTA_REF", "W7A/AW-001");
            } else {
                rec.insert("GRIDSQUARE", locator(i));
            }
            ContactRecord::from_adif(&rec)
        })
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_10k", |b| {
        let locs: Vec<String> = (0..10_000).map(locator).collect();
        b.iter(|| {
            for loc in &locs {
                let _ = decode(loc).expect("decode");
            }
        });
    });
}

fn bench_distance(c: &mut Criterion) {
    let a = decode("JN36").expect("decode");
    let b = decode("FN31").expect("decode");
    c.bench_function("haversine", |bench| bench.iter(|| Haversine.distance_km(&a, &b)));
    c.bench_function("ellipsoidal", |bench| bench.iter(|| EllipsoidalArc.distance_km(&a, &b)));
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich_session");
    let summits = StaticSummitTable::new().with(
        "W7A/AW-001",
        SummitLocation {
            lat: 33.35,
            lon: -111.67,
            alt_m: Some(2370.0),
        },
    );
    let enricher = Enricher::new(summits, EnrichConfig::default());

    for n in [100usize, 1000usize, 10_000usize] {
        let records = contacts(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &records, |b, records| {
            b.iter(|| {
                let session = enricher.enrich(records).expect("enrich");
                session.qsos().count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_distance, bench_enrich);
criterion_main!(benches);
