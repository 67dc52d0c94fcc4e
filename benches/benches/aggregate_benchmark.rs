//! Index build, aggregation and end-to-end batch benchmarks.
//!
//! Run with: `cargo bench --package tickroll-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickroll_bench::SyntheticBatch;
use tickroll_lib::{
    BatchProcessor, BuildOptions, ColumnarIndex, LayoutStyle, LocalZone, OhlcAggregator,
    OutputFormat, OutputLayout, PipelineConfig, Profile, Timeframe, classify, read_rows_from,
};

fn batch_sizes() -> Vec<(&'static str, SyntheticBatch)> {
    vec![
        (
            "1-day",
            SyntheticBatch {
                days: 1,
                ..SyntheticBatch::default()
            },
        ),
        ("5-days", SyntheticBatch::default()),
    ]
}

fn classify_benchmark(c: &mut Criterion) {
    let symbols = SyntheticBatch::default().symbols();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(symbols.len() as u64));
    group.bench_function("symbols", |b| {
        b.iter(|| {
            for symbol in &symbols {
                black_box(classify(black_box(symbol)).ok());
            }
        });
    });
    group.finish();
}

fn index_benchmark(c: &mut Criterion) {
    let allow_list = Profile::All.allow_list();
    let mut group = c.benchmark_group("index_build");

    for (name, batch) in batch_sizes() {
        let rows = batch.rows();
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &rows, |b, rows| {
            b.iter(|| {
                ColumnarIndex::build(rows, &LocalZone::IST, &allow_list, BuildOptions::default())
                    .map(|build| build.index.len())
            });
        });
    }
    group.finish();
}

fn rollup_benchmark(c: &mut Criterion) {
    let allow_list = Profile::All.allow_list();
    let mut group = c.benchmark_group("rollup");

    for (name, batch) in batch_sizes() {
        let rows = batch.rows();
        let Ok(build) =
            ColumnarIndex::build(&rows, &LocalZone::IST, &allow_list, BuildOptions::default())
        else {
            continue;
        };

        for timeframe in [Timeframe::MINUTE_1, Timeframe::MINUTE_5] {
            let id = BenchmarkId::new(timeframe.to_string(), name);
            group.throughput(Throughput::Elements(rows.len() as u64));
            group.bench_with_input(id, &build, |b, build| {
                b.iter(|| {
                    build
                        .symbols
                        .iter()
                        .map(|symbol| OhlcAggregator::new(timeframe).rollup(&build.index, symbol).len())
                        .sum::<usize>()
                });
            });
        }
    }
    group.finish();
}

fn pipeline_benchmark(c: &mut Criterion) {
    let batch = SyntheticBatch::default();
    let csv = batch.to_csv();
    let runtime = tokio_runtime();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.throughput(Throughput::Elements(batch.row_count() as u64));

    group.bench_function("read_csv", |b| {
        b.to_async(&runtime).iter(|| read_rows_from(csv.as_bytes()));
    });

    group.bench_function("process_and_write", |b| {
        let rows = batch.rows();
        b.iter(|| {
            let dir = tempfile::tempdir().ok()?;
            let config = PipelineConfig::default().with_profile(Profile::All);
            let mut processor = BatchProcessor::new(config).ok()?;
            let output = processor.process(&rows, None).ok()??;
            let mut layout =
                OutputLayout::new(dir.path(), LayoutStyle::ByExpiry, OutputFormat::Json);
            for series in &output.series {
                for (timeframe, document) in series.documents(&output.expiry) {
                    layout
                        .write_series(&series.identity, output.expiry.date, timeframe, &document)
                        .ok()?;
                }
            }
            Some(output.bucket_count())
        });
    });
    group.finish();
}

fn tokio_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

criterion_group!(
    benches,
    classify_benchmark,
    index_benchmark,
    rollup_benchmark,
    pipeline_benchmark
);
criterion_main!(benches);
