use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wq_site_finder::models::{FilterSpec, JoinedRecord, Observation, Site};
use wq_site_finder::processors::{to_markers, to_trend, DataMerger, FilterEngine};
use wq_site_finder::readers::ResultsReader;

const CHARACTERISTICS: [&str; 4] = ["Lead", "Nitrate", "Arsenic", "pH"];

// Create test data for benchmarking
fn create_test_data(site_count: usize, days: usize) -> (Vec<Site>, Vec<Observation>) {
    let mut sites = Vec::with_capacity(site_count);
    let mut observations = Vec::new();
    let base_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    for site in 0..site_count {
        let site_id = format!("USGS-{:08}", site);
        // Every tenth site has no location row
        if site % 10 != 0 {
            sites.push(Site::new(
                site_id.clone(),
                39.0 + (site as f64) * 0.01,
                -76.0 - (site as f64) * 0.01,
            ));
        }

        for day in 0..days {
            let date = base_date + chrono::Duration::days(day as i64);
            for (i, characteristic) in CHARACTERISTICS.iter().enumerate() {
                let value = (day as f64) * 0.1 + (site as f64) * 0.5 + i as f64;
                observations.push(Observation::new(
                    site_id.clone(),
                    *characteristic,
                    date,
                    Some(value),
                ));
            }
        }
    }

    (sites, observations)
}

fn create_results_csv(rows: usize) -> String {
    let mut csv = String::from(
        "ActivityStartDate,CharacteristicName,MonitoringLocationIdentifier,ResultMeasureValue\n",
    );
    for row in 0..rows {
        let value = if row % 50 == 0 {
            "ND".to_string()
        } else {
            format!("{:.3}", row as f64 * 0.01)
        };
        csv.push_str(&format!(
            "2020-{:02}-{:02},{},USGS-{:08},{}\n",
            row % 12 + 1,
            row % 28 + 1,
            CHARACTERISTICS[row % CHARACTERISTICS.len()],
            row % 200,
            value
        ));
    }
    csv
}

fn joined_records(site_count: usize, days: usize) -> Vec<JoinedRecord> {
    let (sites, observations) = create_test_data(site_count, days);
    DataMerger::new().merge(observations, &sites).records
}

fn benchmark_results_reader(c: &mut Criterion) {
    let csv = create_results_csv(10_000);

    c.bench_function("results_reader_10k", |b| {
        b.iter(|| {
            let reader = ResultsReader::new();
            black_box(reader.read_str(black_box(&csv)).unwrap())
        })
    });
}

fn benchmark_data_merger(c: &mut Criterion) {
    let (sites, observations) = create_test_data(100, 30);

    c.bench_function("data_merger", |b| {
        b.iter(|| {
            let merger = DataMerger::new();
            black_box(merger.merge(black_box(observations.clone()), black_box(&sites)))
        })
    });
}

fn benchmark_filter_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_engine");

    for site_count in [10, 100, 500] {
        let records = joined_records(site_count, 60);
        let engine = FilterEngine::new();
        let spec = engine.default_spec(&records, "Nitrate");

        group.bench_with_input(
            BenchmarkId::new("range_for_characteristic", site_count),
            &records,
            |b, records| b.iter(|| black_box(engine.range_for_characteristic(records, "Nitrate"))),
        );

        group.bench_with_input(
            BenchmarkId::new("apply_filters", site_count),
            &records,
            |b, records| b.iter(|| black_box(engine.apply_filters(records, black_box(&spec)))),
        );
    }

    group.finish();
}

fn benchmark_aggregation(c: &mut Criterion) {
    let records = joined_records(200, 90);
    let spec = FilterSpec::new(
        "Lead",
        (f64::MIN, f64::MAX),
        (NaiveDate::MIN, NaiveDate::MAX),
    );
    let filtered = FilterEngine::new().apply_filters(&records, &spec);

    c.bench_function("to_markers", |b| b.iter(|| black_box(to_markers(black_box(&filtered)))));
    c.bench_function("to_trend", |b| b.iter(|| black_box(to_trend(black_box(&filtered)))));
}

criterion_group!(
    benches,
    benchmark_results_reader,
    benchmark_data_merger,
    benchmark_filter_engine,
    benchmark_aggregation
);
criterion_main!(benches);
